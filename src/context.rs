//! The current traversal state of the running thread.
//!
//! Renderers call into each other re-entrantly while formatting nested
//! values. Instead of threading a [`State`] through every call, the state of
//! the innermost [`scope`] is available through [`current`]. The binding
//! never outlives the synchronous call that established it; to resume later,
//! capture a [`Continuation`](crate::continuation::Continuation).

use std::cell::RefCell;

use tracing::error;

use crate::error::Error;
use crate::state::State;

thread_local! {
    static CURRENT: RefCell<Option<State>> = const { RefCell::new(None) };
}

struct Restore(Option<State>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        CURRENT.with(|slot| *slot.borrow_mut() = previous);
    }
}

fn no_active_traversal() -> Error {
    error!("traversal state accessed outside of an active traversal");
    Error::NoActiveTraversal
}

/// Runs `f` with `state` as the current state, restoring the previous
/// binding afterwards, also when `f` unwinds.
pub fn scope<F, R>(state: State, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = CURRENT.with(|slot| slot.replace(Some(state)));
    let _restore = Restore(previous);
    f()
}

pub fn is_active() -> bool {
    CURRENT.with(|slot| slot.borrow().is_some())
}

pub fn current() -> crate::Result<State> {
    CURRENT
        .with(|slot| slot.borrow().clone())
        .ok_or_else(no_active_traversal)
}

/// Replaces the current state with `f(current)`.
pub fn update<F>(f: F) -> crate::Result<()>
where
    F: FnOnce(State) -> State,
{
    let next = f(current()?);
    CURRENT.with(|slot| *slot.borrow_mut() = Some(next));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_no_active_traversal() {
        crate::init_tracing();
        assert!(!is_active());
        assert!(matches!(current(), Err(Error::NoActiveTraversal)));
        assert!(matches!(
            update(|s| s.set_prevent_recursion(true)),
            Err(Error::NoActiveTraversal)
        ));
    }

    #[test]
    fn test_scope_restores_previous_state() -> crate::Result<()> {
        let root = Value::new_vector();
        scope(State::fresh().set_depth_budget(Some(5)), || -> crate::Result<()> {
            scope(State::fresh().descend(&root), || -> crate::Result<()> {
                let inner = current()?;
                assert!(inner.is_circular(&root));
                assert_eq!(inner.depth_budget(), None);
                Ok(())
            })?;
            let outer = current()?;
            assert!(!outer.is_circular(&root));
            assert_eq!(outer.depth_budget(), Some(5));
            Ok(())
        })?;
        assert!(!is_active());
        Ok(())
    }

    #[test]
    fn test_update_replaces_current() -> crate::Result<()> {
        scope(State::fresh(), || {
            update(|s| s.set_managed_print_level(Some(2)))?;
            update(|s| s.consume_print_level())?;
            assert_eq!(current()?.managed_print_level(), Some(1));
            Ok(())
        })
    }

    #[test]
    fn test_scope_restores_after_panic() {
        let result = std::panic::catch_unwind(|| {
            scope(State::fresh(), || panic!("renderer failed"));
        });
        assert!(result.is_err());
        assert!(!is_active());
    }
}
