//! Review-view state: the selection state machine and debounced persistence.

pub mod persistence;
pub mod session;

pub use persistence::{DebouncedSaver, SAVE_DEBOUNCE};
pub use session::{Decision, PendingSpan, ReviewSession, SelectionState, SessionError};
