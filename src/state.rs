use tracing::trace;

use crate::history::History;
use crate::path::{self, Breadcrumb};
use crate::value::Value;

/// Snapshot of everything a renderer needs to know about where it is in a
/// traversal.
///
/// A `State` is never modified in place: every update returns a new value,
/// and clones are cheap because the history is structurally shared.
#[derive(Debug, Clone, Default)]
pub struct State {
    history: History,
    path_info: Option<Breadcrumb>,
    prevent_recursion: bool,
    managed_print_level: Option<u32>,
    depth_budget: Option<u32>,
}

impl State {
    /// Empty history, no path, no flags and no budgets.
    pub fn fresh() -> Self {
        Default::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn path_info(&self) -> Option<&Breadcrumb> {
        self.path_info.as_ref()
    }

    pub fn parent(&self) -> Option<&Value> {
        self.history.parent()
    }

    pub fn is_circular(&self, object: &Value) -> bool {
        self.history.is_circular(object)
    }

    pub fn push(&self, object: Value) -> State {
        State {
            history: self.history.push(object),
            ..self.clone()
        }
    }

    pub fn extend_path(&self, object: &Value) -> State {
        State {
            path_info: path::extend_path(self.path_info.as_ref(), &self.history, object),
            ..self.clone()
        }
    }

    /// Enters `object`: records the segment from the current parent, then
    /// makes `object` the parent of whatever is rendered next.
    pub fn descend(&self, object: &Value) -> State {
        let next = self.extend_path(object).push(object.clone());
        trace!(
            depth = next.history.len(),
            path = %next.path_info.as_ref().map(ToString::to_string).unwrap_or_default(),
            "descend into {}",
            object.ty()
        );
        next
    }

    /// Drops the breadcrumb, e.g. when the rendered relation is synthetic.
    pub fn ignore_path(&self) -> State {
        State {
            path_info: None,
            ..self.clone()
        }
    }

    pub fn prevent_recursion(&self) -> bool {
        self.prevent_recursion
    }

    pub fn set_prevent_recursion(&self, prevent: bool) -> State {
        State {
            prevent_recursion: prevent,
            ..self.clone()
        }
    }

    pub fn managed_print_level(&self) -> Option<u32> {
        self.managed_print_level
    }

    /// `None` lifts the constraint, `Some(0)` forbids any further level.
    pub fn set_managed_print_level(&self, level: Option<u32>) -> State {
        State {
            managed_print_level: level,
            ..self.clone()
        }
    }

    pub fn depth_budget(&self) -> Option<u32> {
        self.depth_budget
    }

    /// `None` lifts the constraint, `Some(0)` forbids any further descent.
    pub fn set_depth_budget(&self, budget: Option<u32>) -> State {
        State {
            depth_budget: budget,
            ..self.clone()
        }
    }

    pub fn consume_depth(&self) -> State {
        self.set_depth_budget(self.depth_budget.map(|budget| budget.saturating_sub(1)))
    }

    pub fn consume_print_level(&self) -> State {
        self.set_managed_print_level(self.managed_print_level.map(|level| level.saturating_sub(1)))
    }

    pub fn is_depth_exhausted(&self) -> bool {
        self.depth_budget == Some(0)
    }

    pub fn is_print_level_exhausted(&self) -> bool {
        self.managed_print_level == Some(0)
    }

    /// Clears both budgets. History and path are kept.
    pub fn reset_depth_limits(&self) -> State {
        self.set_depth_budget(None).set_managed_print_level(None)
    }
}
