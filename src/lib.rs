//! Traversal state for lazy, cycle-aware value inspectors.
//!
//! An inspector renders a value in two phases: a one-line header and, when
//! the user asks for it, a body. Bodies of nested values are requested by
//! separate calls, so everything the renderer knows about its position (the
//! ancestors it has visited, the breadcrumb from the root, the remaining
//! budgets) lives in a [`State`] that can be captured into a
//! [`Continuation`] and restored later.

pub mod context;
pub mod continuation;
pub mod error;
pub mod history;
pub mod macros;
pub mod markup;
pub mod options;
pub mod path;
pub mod renderer;
pub mod state;
pub mod transform;
pub mod value;

pub use continuation::Continuation;
pub use options::InspectOptions;
pub use renderer::Renderer;
pub use state::State;
pub use value::Value;

pub type Result<T> = std::result::Result<T, error::Error>;

#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
