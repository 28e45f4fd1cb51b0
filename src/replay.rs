//! Scripted replay of widget interactions against the in-memory scene.
//!
//! A script names the natural image size, the widget options and a list of events; pointer
//! coordinates are surface-local. The report captures the resulting selection and mask.

use serde::{Deserialize, Serialize};

use crate::config::{MdaOptions, SelectionMode};
use crate::controller::MdaWidget;
use crate::error::{MdaError, MdaResult};
use crate::geometry::{CanvasBounds, SelectionBounds};
use crate::host::memory::MemoryScene;
use crate::host::ImageTarget;
use crate::mask::MaskPath;

const REPLAY_TARGET: &str = "replay-image";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReplayEvent {
    PointerDown {
        x: f64,
        y: f64,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Move {
        left: f64,
        top: f64,
    },
    #[serde(rename_all = "camelCase")]
    Scale {
        left: f64,
        top: f64,
        scale_x: f64,
        scale_y: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub image: ImageSize,
    #[serde(default)]
    pub options: MdaOptions,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> MdaResult<Self> {
        let script: ReplayScript = serde_json::from_str(json).map_err(MdaError::Script)?;
        script.options.validate()?;
        Ok(script)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub mode: SelectionMode,
    pub scale: f64,
    pub canvas: CanvasBounds,
    pub selection: SelectionBounds,
    pub selected: bool,
    /// SVG path data of the overlay; absent in draw mode.
    pub mask: Option<String>,
}

pub fn run(script: &ReplayScript) -> MdaResult<ReplayReport> {
    script.options.validate()?;

    let target = ImageTarget::new(script.image.width, script.image.height);
    let mut scene = MemoryScene::new().with_target(REPLAY_TARGET, target);
    let mut widget = MdaWidget::attach(&mut scene, REPLAY_TARGET, &script.options)
        .ok_or_else(|| MdaError::TargetNotFound(REPLAY_TARGET.to_string()))?;
    let rect_id = widget.selection_object();

    for (index, event) in script.events.iter().enumerate() {
        tracing::trace!(index, ?event, "replaying event");
        let host_event = match *event {
            ReplayEvent::PointerDown { x, y } => scene.press(x, y),
            ReplayEvent::PointerMove { x, y } => scene.motion(x, y),
            ReplayEvent::PointerUp { x, y } => scene.release(x, y),
            ReplayEvent::Move { left, top } => scene.drag_object_to(rect_id, left, top),
            ReplayEvent::Scale {
                left,
                top,
                scale_x,
                scale_y,
            } => scene.scale_object(rect_id, left, top, scale_x, scale_y),
        };
        widget.handle_event(&mut scene, host_event);
    }

    tracing::info!(
        events = script.events.len(),
        selection = ?widget.selection(),
        "replay finished"
    );
    Ok(ReplayReport {
        mode: widget.mode(),
        scale: widget.scale(),
        canvas: widget.canvas(),
        selection: widget.selection(),
        selected: widget.is_selected(),
        mask: widget.mask().map(MaskPath::svg_data),
    })
}
