//! Self-contained share links: a plan and its annotations compressed into a
//! URL fragment, and the merge rules applied when a link is re-shared.

pub mod codec;
pub mod merge;
pub mod shared_review;

pub use codec::{
    SHARE_PATH, SIZE_WARNING_THRESHOLD, ShareLink, build_share_url, compress, compressed_size,
    decompress, is_size_safe, open_share, payload_from_url, share_link,
};
pub use merge::{ANONYMOUS, create_shareable_plan, merge_annotations, reshare};
pub use shared_review::{LOCAL_AUTHOR, SharedReview};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("could not encode plan: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("link does not contain a valid shared plan")]
    InvalidLink,
    #[error("annotation {0} belongs to the shared plan and cannot be deleted")]
    ReadOnly(String),
    #[error("annotation {0} does not exist")]
    UnknownAnnotation(String),
    #[error("set a reviewer name before sharing annotations")]
    IdentityRequired,
}
