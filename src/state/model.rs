use crate::geometry::Point;

/// Fixed corner of a drag-to-create gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub anchor: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub const fn session(&self) -> Option<DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(*session),
        }
    }

    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}
