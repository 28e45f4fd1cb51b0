//! Capability surface the widget consumes from the rendering/scene layer.
//!
//! The widget never draws or hit-tests on its own. A host wraps whatever scene library is in
//! use, implements [`SceneHost`], and forwards its input as [`HostEvent`]s.

pub mod memory;

use crate::geometry::{CanvasBounds, Color, Point, RectGeometry};
use crate::mask::MaskPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Natural size of the image element a widget is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTarget {
    pub natural_width: f64,
    pub natural_height: f64,
}

impl ImageTarget {
    pub const fn new(natural_width: f64, natural_height: f64) -> Self {
        Self {
            natural_width,
            natural_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Color>,
    pub opacity: f64,
    pub corner_color: Color,
    pub corner_size: f64,
    pub rotatable: bool,
}

pub(crate) const CORNER_COLOR: Color = Color::rgb(0x44, 0x44, 0x44);
pub(crate) const CORNER_SIZE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStyle {
    pub fill: Color,
    pub opacity: f64,
}

/// Objects the widget places on the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// The source image drawn at a uniform scale; never interactive.
    Image { target: ImageTarget, scale: f64 },
    /// The selection rectangle; movable and scalable by the host's handles.
    Rect {
        geometry: RectGeometry,
        style: RectStyle,
    },
    /// The darkening overlay; never interactive.
    Mask { path: MaskPath, style: MaskStyle },
}

impl SceneObject {
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Rect { .. })
    }
}

/// Input the host forwards to the widget, in the order it was received.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent<P> {
    PointerDown(P),
    PointerMove(P),
    PointerUp(P),
    /// The object was dragged by its body; its geometry holds the proposed position.
    ObjectMoved(ObjectId),
    /// A corner or edge handle was dragged; its geometry holds the proposed position and scale.
    ObjectScaled(ObjectId),
}

pub trait SceneHost {
    /// Raw pointer event as the host receives it.
    type PointerEvent;

    fn resolve_target(&self, target: &str) -> Option<ImageTarget>;

    fn create_surface(&mut self, bounds: CanvasBounds);

    /// Adds on top of the existing objects.
    fn add_object(&mut self, object: SceneObject) -> ObjectId;

    fn remove_object(&mut self, id: ObjectId);

    fn bring_to_front(&mut self, id: ObjectId);

    fn pointer_position(&self, event: &Self::PointerEvent) -> Point;

    fn object_geometry(&self, id: ObjectId) -> Option<RectGeometry>;

    fn set_object_geometry(&mut self, id: ObjectId, geometry: RectGeometry);

    fn contains_point(&self, id: ObjectId, point: Point) -> bool;

    fn active_object(&self) -> Option<ObjectId>;

    /// `None` discards the current focus.
    fn set_active_object(&mut self, id: Option<ObjectId>);

    fn set_default_cursor(&mut self, _cursor: Cursor) {}

    fn request_render(&mut self) {}
}
