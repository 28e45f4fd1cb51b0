pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod mask;
pub mod replay;
pub mod scale;
pub mod selection;
pub mod state;

pub use config::{MdaOptions, SelectionMode};
pub use controller::MdaWidget;
pub use error::{MdaError, MdaResult};
pub use geometry::{CanvasBounds, Point, SelectionBounds};
pub use host::{HostEvent, SceneHost};
pub use mask::{build_mask_path, MaskPath};
pub use scale::compute_scale;
pub use selection::SelectionRect;
