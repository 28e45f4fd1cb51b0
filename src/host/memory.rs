//! Headless [`SceneHost`] that keeps the scene in memory.
//!
//! Used by the replay tool and the tests. Focus handling follows common scene libraries: a
//! press on an interactive object focuses it before the widget sees the event, a press on
//! empty canvas drops the focus.

use std::collections::HashMap;

use super::{Cursor, HostEvent, ImageTarget, ObjectId, SceneHost, SceneObject};
use crate::geometry::{CanvasBounds, Point, RectGeometry};

/// Pointer position in page coordinates, before the surface offset is removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointer {
    pub client_x: f64,
    pub client_y: f64,
}

#[derive(Debug, Default)]
pub struct MemoryScene {
    targets: HashMap<String, ImageTarget>,
    surface: Option<CanvasBounds>,
    offset: Point,
    objects: Vec<(ObjectId, SceneObject)>,
    next_id: u64,
    active: Option<ObjectId>,
    cursor: Cursor,
    render_requests: usize,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, name: impl Into<String>, target: ImageTarget) -> Self {
        self.targets.insert(name.into(), target);
        self
    }

    /// Page position of the surface's top-left corner.
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn surface(&self) -> Option<CanvasBounds> {
        self.surface
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().map(|(_, object)| object)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|(object_id, _)| *object_id == id)
            .map(|(_, object)| object)
    }

    pub fn mask_count(&self) -> usize {
        self.objects()
            .filter(|object| matches!(object, SceneObject::Mask { .. }))
            .count()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn render_requests(&self) -> usize {
        self.render_requests
    }

    /// Topmost interactive object under a surface-local point.
    pub fn top_object_at(&self, point: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .filter(|(_, object)| object.is_interactive())
            .map(|(id, _)| *id)
            .find(|id| self.contains_point(*id, point))
    }

    pub fn press(&mut self, client_x: f64, client_y: f64) -> HostEvent<RawPointer> {
        let raw = RawPointer { client_x, client_y };
        let point = self.pointer_position(&raw);
        self.active = self.top_object_at(point);
        HostEvent::PointerDown(raw)
    }

    pub fn motion(&self, client_x: f64, client_y: f64) -> HostEvent<RawPointer> {
        HostEvent::PointerMove(RawPointer { client_x, client_y })
    }

    pub fn release(&self, client_x: f64, client_y: f64) -> HostEvent<RawPointer> {
        HostEvent::PointerUp(RawPointer { client_x, client_y })
    }

    /// Moves an object the way a body drag would, without any bounds checks.
    pub fn drag_object_to(&mut self, id: ObjectId, left: f64, top: f64) -> HostEvent<RawPointer> {
        if let Some(geometry) = self.object_geometry(id) {
            self.set_object_geometry(id, RectGeometry { left, top, ..geometry });
        }
        HostEvent::ObjectMoved(id)
    }

    /// Rescales an object the way a handle drag would, without any bounds checks.
    pub fn scale_object(
        &mut self,
        id: ObjectId,
        left: f64,
        top: f64,
        scale_x: f64,
        scale_y: f64,
    ) -> HostEvent<RawPointer> {
        if let Some(geometry) = self.object_geometry(id) {
            self.set_object_geometry(
                id,
                RectGeometry {
                    left,
                    top,
                    scale_x,
                    scale_y,
                    ..geometry
                },
            );
        }
        HostEvent::ObjectScaled(id)
    }

    fn position_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|(object_id, _)| *object_id == id)
    }
}

impl SceneHost for MemoryScene {
    type PointerEvent = RawPointer;

    fn resolve_target(&self, target: &str) -> Option<ImageTarget> {
        self.targets.get(target).copied()
    }

    fn create_surface(&mut self, bounds: CanvasBounds) {
        self.surface = Some(bounds);
        self.objects.clear();
        self.active = None;
    }

    fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.next_id = self.next_id.saturating_add(1);
        let id = ObjectId(self.next_id);
        self.objects.push((id, object));
        id
    }

    fn remove_object(&mut self, id: ObjectId) {
        if let Some(index) = self.position_of(id) {
            self.objects.remove(index);
        }
        if self.active == Some(id) {
            self.active = None;
        }
    }

    fn bring_to_front(&mut self, id: ObjectId) {
        if let Some(index) = self.position_of(id) {
            let entry = self.objects.remove(index);
            self.objects.push(entry);
        }
    }

    fn pointer_position(&self, event: &RawPointer) -> Point {
        Point::new(
            event.client_x - self.offset.x,
            event.client_y - self.offset.y,
        )
    }

    fn object_geometry(&self, id: ObjectId) -> Option<RectGeometry> {
        match self.object(id)? {
            SceneObject::Rect { geometry, .. } => Some(*geometry),
            SceneObject::Image { .. } | SceneObject::Mask { .. } => None,
        }
    }

    fn set_object_geometry(&mut self, id: ObjectId, next: RectGeometry) {
        let Some(index) = self.position_of(id) else {
            return;
        };
        if let SceneObject::Rect { geometry, .. } = &mut self.objects[index].1 {
            *geometry = next;
        }
    }

    fn contains_point(&self, id: ObjectId, point: Point) -> bool {
        // Degenerate rectangles are not hit targets.
        self.object_geometry(id).is_some_and(|geometry| {
            let bounds = geometry.bounds();
            bounds.area() > 0.0 && bounds.contains_point(point)
        })
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn set_active_object(&mut self, id: Option<ObjectId>) {
        self.active = id;
    }

    fn set_default_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}
