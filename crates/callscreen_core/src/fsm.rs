//! State Machine Runtime
//!
//! Flat statecharts for interaction states (the answer slider, tap surfaces).
//! Transitions are matched in the order they were added. Terminal states
//! swallow every later event.
//!
//! Event ids share their numbering with [`crate::events::event_types`], so a
//! machine can be fed straight from the input event stream.

use smallvec::SmallVec;

use crate::events::EventType;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = EventType;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }

    fn matches(&self, state: StateId, event: EventId) -> bool {
        self.from_state == state && self.event == event
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    name: &'static str,
    initial_state: StateId,
    transitions: Vec<Transition>,
    terminal: SmallVec<[StateId; 2]>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            name: "fsm",
            initial_state,
            transitions: Vec::new(),
            terminal: SmallVec::new(),
        }
    }

    /// Label used in trace output
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Mark a state as terminal: once entered, the machine ignores all events
    pub fn terminal(mut self, state: StateId) -> Self {
        self.terminal.push(state);
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            name: self.name,
            current_state: self.initial_state,
            transitions: self.transitions,
            terminal: self.terminal,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    name: &'static str,
    current_state: StateId,
    transitions: Vec<Transition>,
    terminal: SmallVec<[StateId; 2]>,
}

impl StateMachine {
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            name: "fsm",
            current_state: initial_state,
            transitions,
            terminal: SmallVec::new(),
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Whether the machine has reached a terminal state
    pub fn is_finished(&self) -> bool {
        self.terminal.contains(&self.current_state)
    }

    /// Send an event, returning the state the machine is in afterwards
    pub fn send(&mut self, event: EventId) -> StateId {
        self.try_send(event).unwrap_or(self.current_state)
    }

    /// Send an event, returning the new state only if a transition fired
    pub fn try_send(&mut self, event: EventId) -> Option<StateId> {
        if self.is_finished() {
            tracing::trace!(
                "{}: event {} ignored in terminal state {}",
                self.name,
                event,
                self.current_state
            );
            return None;
        }

        let current = self.current_state;
        let to_state = self
            .transitions
            .iter()
            .find(|t| t.matches(current, event))?
            .to_state;

        self.current_state = to_state;
        tracing::trace!("{}: {} --{}--> {}", self.name, current, event, to_state);
        Some(to_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types::{POINTER_DOWN, POINTER_MOVE, POINTER_UP, SETTLED, TAP};

    const IDLE: StateId = 0;
    const DRAGGING: StateId = 1;
    const SNAP_BACK: StateId = 2;
    const COMMITTED: StateId = 3;

    fn slider() -> StateMachine {
        StateMachine::builder(IDLE)
            .name("slider")
            .on(IDLE, POINTER_DOWN, DRAGGING)
            .on(DRAGGING, POINTER_UP, SNAP_BACK)
            .on(SNAP_BACK, SETTLED, IDLE)
            .on(IDLE, TAP, COMMITTED)
            .terminal(COMMITTED)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = slider();
        assert_eq!(fsm.current_state(), IDLE);

        fsm.send(POINTER_DOWN);
        assert_eq!(fsm.current_state(), DRAGGING);

        fsm.send(POINTER_UP);
        assert_eq!(fsm.current_state(), SNAP_BACK);

        fsm.send(SETTLED);
        assert!(fsm.is_in(IDLE));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = slider();
        assert_eq!(fsm.try_send(POINTER_UP), None);
        assert_eq!(fsm.send(POINTER_MOVE), IDLE);
        assert_eq!(fsm.current_state(), IDLE);
    }

    #[test]
    fn test_terminal_state_swallows_events() {
        let mut fsm = slider();
        assert_eq!(fsm.try_send(TAP), Some(COMMITTED));
        assert!(fsm.is_finished());
        assert_eq!(fsm.try_send(POINTER_DOWN), None);
        assert_eq!(fsm.current_state(), COMMITTED);
    }

    #[test]
    fn test_first_matching_transition_wins() {
        let mut fsm = StateMachine::new(
            IDLE,
            vec![
                Transition::new(IDLE, TAP, COMMITTED),
                Transition::new(IDLE, TAP, DRAGGING),
            ],
        );
        assert_eq!(fsm.send(TAP), COMMITTED);
        // No terminal states declared, so nothing is swallowed
        assert!(!fsm.is_finished());
    }
}
