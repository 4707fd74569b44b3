use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use crate::context;
use crate::path::Breadcrumb;
use crate::state::State;

/// Opaque snapshot of a traversal state attached to a deferred subtree.
///
/// The host keeps the token and hands it back unchanged when the user asks
/// for the subtree; [`Continuation::restore`] then yields the exact state
/// that was captured. The token keeps the visited objects alive for as long
/// as the host holds it.
#[derive(Clone)]
pub struct Continuation(Rc<State>);

impl Continuation {
    pub fn capture(state: &State) -> Self {
        Self(Rc::new(state.clone()))
    }

    /// Captures the state bound to the running thread.
    pub fn current() -> crate::Result<Self> {
        Ok(Self::capture(&context::current()?))
    }

    pub fn restore(&self) -> State {
        State::clone(&self.0)
    }

    pub fn breadcrumb(&self) -> Option<&Breadcrumb> {
        self.0.path_info()
    }

    /// Number of ancestors recorded in the snapshot.
    pub fn depth(&self) -> usize {
        self.0.history().len()
    }
}

impl Debug for Continuation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation")
            .field("path", &self.breadcrumb().map(ToString::to_string))
            .field("depth", &self.depth())
            .field("depth_budget", &self.0.depth_budget())
            .field("managed_print_level", &self.0.managed_print_level())
            .finish()
    }
}
