use crate::geometry::Point;

use super::model::DragState;

/// Pointer lifecycle events in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTransition {
    pub from: DragState,
    pub event: DragEvent,
    pub to: DragState,
}

impl StateTransition {
    pub const fn new(from: DragState, event: DragEvent, to: DragState) -> Self {
        Self { from, event, to }
    }
}
