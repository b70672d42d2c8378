//! Binding annotations to spans of the rendered document and finding those
//! spans again after the document is rebuilt.
//!
//! An anchor is block id + character offsets + the exact original text, plus
//! optional structural hints. Restoration prefers a live highlight, then the
//! hints, then a search for the original text.

pub mod capture;
pub mod meta;
pub mod restore;
pub mod search;
pub mod surface;

pub use capture::{Anchor, capture_anchor, capture_block};
pub use meta::{capture_meta, resolve_meta};
pub use restore::{RestoreOutcome, RestoreReport, restore_highlights};
pub use search::TextIndex;
pub use surface::{
    BIND_ID_ATTR, DomSurface, HIGHLIGHT_CLASS, HIGHLIGHT_TAG, HighlightSurface,
    is_highlight_wrapper,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnchorError {
    #[error("selection is empty")]
    EmptySelection,
    #[error("selection ends are not ordered text positions")]
    InvalidRange,
    #[error("selection is not inside a rendered block")]
    OutsideBlock,
    #[error("block {0} is not rendered")]
    UnknownBlock(String),
    #[error("highlight {0} already exists")]
    DuplicateHighlight(String),
}
