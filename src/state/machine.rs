use super::error::{StateError, StateResult};
use super::{event::StateTransition, DragEvent, DragSession, DragState};

/// Drag-to-create lifecycle: `Idle -> Dragging -> Idle`, plus a `selected` flag that turns on
/// when the first drag completes and stays on.
#[derive(Debug, Default)]
pub struct DragMachine {
    state: DragState,
    selected: bool,
    last_transition: Option<StateTransition>,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn last_transition(&self) -> Option<StateTransition> {
        self.last_transition
    }

    pub fn can_transition(&self, event: DragEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: DragEvent) -> Option<DragState> {
        use DragEvent::*;
        match (self.state, event) {
            (_, PointerDown(anchor)) => Some(DragState::Dragging(DragSession { anchor })),
            (DragState::Dragging(session), PointerMove(_)) => Some(DragState::Dragging(session)),
            (DragState::Dragging(_), PointerUp(_)) => Some(DragState::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: DragEvent) -> StateResult<DragState> {
        let next = self.next_state(event).ok_or(StateError::InvalidTransition {
            from: self.state,
            event,
        })?;

        if let (DragState::Dragging(_), DragState::Idle) = (self.state, next) {
            self.selected = true;
        }
        self.last_transition = Some(StateTransition::new(self.state, event, next));
        self.state = next;

        Ok(self.state)
    }
}

impl std::fmt::Display for DragMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.state {
            DragState::Idle => write!(f, "DragState::Idle (selected={})", self.selected),
            DragState::Dragging(session) => write!(
                f,
                "DragState::Dragging from ({}, {})",
                session.anchor.x, session.anchor.y
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn down(x: f64, y: f64) -> DragEvent {
        DragEvent::PointerDown(Point::new(x, y))
    }

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut machine = DragMachine::new();
        assert!(machine.can_transition(down(1.0, 1.0)));
        assert!(!machine.can_transition(DragEvent::PointerMove(Point::new(2.0, 2.0))));
        assert!(!machine.can_transition(DragEvent::PointerUp(Point::new(2.0, 2.0))));

        machine
            .transition(down(1.0, 1.0))
            .expect("idle -> dragging should transition");

        assert!(machine.can_transition(DragEvent::PointerMove(Point::new(2.0, 2.0))));
        assert!(machine.can_transition(DragEvent::PointerUp(Point::new(2.0, 2.0))));
    }

    #[test]
    fn full_drag_marks_selection_and_returns_to_idle() {
        let mut machine = DragMachine::new();
        machine.transition(down(10.0, 20.0)).expect("down");
        let state = machine
            .transition(DragEvent::PointerMove(Point::new(40.0, 50.0)))
            .expect("move");
        assert_eq!(
            state.session().map(|session| session.anchor),
            Some(Point::new(10.0, 20.0))
        );
        assert!(!machine.is_selected());

        let state = machine
            .transition(DragEvent::PointerUp(Point::new(40.0, 50.0)))
            .expect("up");
        assert_eq!(state, DragState::Idle);
        assert!(machine.is_selected());
        assert_eq!(
            machine.last_transition(),
            Some(StateTransition::new(
                DragState::Dragging(DragSession {
                    anchor: Point::new(10.0, 20.0)
                }),
                DragEvent::PointerUp(Point::new(40.0, 50.0)),
                DragState::Idle
            ))
        );
    }

    #[test]
    fn new_pointer_down_supersedes_running_drag() {
        let mut machine = DragMachine::new();
        machine.transition(down(10.0, 20.0)).expect("first down");
        let state = machine.transition(down(70.0, 80.0)).expect("second down");
        assert_eq!(
            state.session().map(|session| session.anchor),
            Some(Point::new(70.0, 80.0))
        );
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_state() {
        let mut machine = DragMachine::new();

        let err = machine
            .transition(DragEvent::PointerUp(Point::new(0.0, 0.0)))
            .expect_err("idle -> pointer up should fail");
        assert!(matches!(
            err,
            StateError::InvalidTransition {
                from: DragState::Idle,
                event: DragEvent::PointerUp(_)
            }
        ));
        assert_eq!(machine.state(), DragState::Idle);
        assert!(machine.last_transition().is_none());
        assert!(!machine.is_selected());
    }
}
