pub mod anchoring;
pub mod feedback;
pub mod models;
pub mod parsing;
pub mod render;
pub mod review;
pub mod share;
pub mod store;

// Re-export key types for easier usage
pub use anchoring::{AnchorError, DomSurface, HighlightSurface, RestoreOutcome, RestoreReport};
pub use feedback::{NO_CHANGES, export_feedback};
pub use models::{
    Annotation, AnnotationKind, AnnotationType, AuthorIdentity, DomMeta, ShareableAnnotation,
    ShareablePlan,
};
pub use parsing::{
    blocks::{Block, BlockKind},
    parse, plan_title,
};
pub use review::{DebouncedSaver, Decision, ReviewSession, SelectionState, SessionError};
pub use share::{ShareError, ShareLink, SharedReview};
pub use store::{AnnotationStore, FileStore, MemoryStore, StoreError};
