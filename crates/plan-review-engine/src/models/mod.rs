pub mod annotation;
pub mod identity;
pub mod shareable;

pub use annotation::{Annotation, AnnotationError, AnnotationKind, AnnotationType, DomMeta};
pub use identity::{AUTHOR_COLORS, AuthorIdentity, random_color};
pub use shareable::{ShareableAnnotation, ShareablePlan};
