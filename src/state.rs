use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use crate::entity::{Body, Context};

/// States are registered & looked up by name.
pub type StateId = &'static str;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("no state named \"{0}\" is registered")]
    UnknownState(StateId),
}

/// A named unit of behavior in an entity's state machine.
///
/// A state only holds fields scoped to a single stay in it (timers, cached deltas, a "run"
/// flag); `enter` resets them. `execute` never switches state itself, it returns the id of
/// the state it wants next and the machine performs the transition.
pub trait State {
    fn enter(&mut self, _body: &mut Body, _ctx: &mut Context) {}

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId>;

    /// Leaving a state must leave the next one a clean collision list.
    fn exit(&mut self, body: &mut Body, _ctx: &mut Context) {
        body.clear_collisions();
    }
}

// ---------------------------------------------------------------------------------------------------------------------

pub struct StateMachine {
    states: HashMap<StateId, Box<dyn State>>,
    current: StateId,
    previous: StateId,
}

impl StateMachine {
    /// Creates a machine resting in `initial`. Construction is the single bootstrap transition:
    /// `initial` is not entered, so entity constructors establish whatever it expects.
    pub fn new(initial: StateId) -> Self {
        Self {
            states: HashMap::new(),
            current: initial,
            previous: initial,
        }
    }

    pub fn with<S: State + 'static>(mut self, id: StateId, state: S) -> Self {
        self.states.insert(id, Box::new(state));
        self
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn previous(&self) -> StateId {
        self.previous
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(id)
    }

    /// Exits the current state and enters `id`. An unregistered `id` changes nothing and calls
    /// neither exit nor enter.
    pub fn transition(
        &mut self,
        body: &mut Body,
        id: StateId,
        ctx: &mut Context,
    ) -> Result<(), StateError> {
        if !self.states.contains_key(id) {
            return Err(StateError::UnknownState(id));
        }

        if let Some(current) = self.states.get_mut(self.current) {
            current.exit(body, ctx);
        }
        body.clear_collisions();

        trace!(
            entity_id = body.id,
            "{:?} {} -> {}",
            body.class,
            self.current,
            id
        );

        self.previous = self.current;
        self.current = id;

        if let Some(next) = self.states.get_mut(id) {
            next.enter(body, ctx);
        }
        Ok(())
    }

    /// Runs the current state's execute, returning the transition it requested.
    pub fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        match self.states.get_mut(self.current) {
            Some(state) => state.execute(body, ctx, dt),
            None => None,
        }
    }
}
