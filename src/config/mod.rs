use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Color, SelectionBounds};

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse widget options")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a finite number greater than zero, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },
    #[error("maskOpacity must be within 0..=1, got {0}")]
    InvalidOpacity(f64),
}

/// Which widget flavour to build on attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Rectangle is drawn by dragging on the canvas.
    #[default]
    Draw,
    /// Rectangle always exists; everything outside it is darkened.
    Overlay,
}

pub const DEFAULT_MAX_WIDTH: f64 = 500.0;
pub const DEFAULT_MASK_OPACITY: f64 = 0.7;
pub const DEFAULT_INITIAL_SELECTION: SelectionBounds = SelectionBounds::new(100.0, 50.0, 400.0, 50.0);

/// Widget options supplied by the host.
///
/// Each key missing from the input falls back to its default independently. An explicit
/// `null` for `maxWidth` or `maxHeight` removes the constraint on that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MdaOptions {
    /// Defaults to 500 px.
    pub max_width: Option<f64>,
    /// Unconstrained by default.
    pub max_height: Option<f64>,
    /// Fill of the drawn rectangle in [`SelectionMode::Draw`]. Defaults to black.
    pub selection_fill: Color,
    pub mode: SelectionMode,
    /// Fill of the darkening overlay in [`SelectionMode::Overlay`]. Defaults to black.
    pub mask_fill: Color,
    pub mask_opacity: f64,
    /// Starting rectangle in [`SelectionMode::Overlay`], fitted to the canvas on attach.
    pub initial_selection: SelectionBounds,
}

impl Default for MdaOptions {
    fn default() -> Self {
        Self {
            max_width: Some(DEFAULT_MAX_WIDTH),
            max_height: None,
            selection_fill: Color::BLACK,
            mode: SelectionMode::Draw,
            mask_fill: Color::BLACK,
            mask_opacity: DEFAULT_MASK_OPACITY,
            initial_selection: DEFAULT_INITIAL_SELECTION,
        }
    }
}

impl MdaOptions {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let options: MdaOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_size(mut self, max_width: Option<f64>, max_height: Option<f64>) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_dimension("maxWidth", self.max_width)?;
        validate_dimension("maxHeight", self.max_height)?;
        if !(0.0..=1.0).contains(&self.mask_opacity) {
            return Err(ConfigError::InvalidOpacity(self.mask_opacity));
        }
        Ok(())
    }
}

fn validate_dimension(field: &'static str, value: Option<f64>) -> ConfigResult<()> {
    match value {
        Some(value) if !value.is_finite() || value <= 0.0 => {
            Err(ConfigError::InvalidDimension { field, value })
        }
        _ => Ok(()),
    }
}
