use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire name of an annotation's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnnotationType {
    Deletion,
    Insertion,
    Replacement,
    Comment,
    GlobalComment,
}

impl AnnotationType {
    /// CSS class applied to a highlight of this kind, if it is highlighted at all.
    pub fn highlight_class(self) -> Option<&'static str> {
        match self {
            AnnotationType::Deletion => Some("deletion"),
            AnnotationType::Replacement => Some("replacement"),
            AnnotationType::Comment => Some("comment"),
            AnnotationType::Insertion => Some("insertion"),
            AnnotationType::GlobalComment => None,
        }
    }
}

/// What the reviewer asked for, with the payload each kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Remove the span.
    Deletion,
    /// Add `text` at this point.
    Insertion { text: String },
    /// Replace the span with `text`.
    Replacement { text: String },
    /// Remark on the span.
    Comment { text: String },
    /// Remark on the whole plan; has no span.
    GlobalComment { text: String },
}

impl AnnotationKind {
    pub fn annotation_type(&self) -> AnnotationType {
        match self {
            AnnotationKind::Deletion => AnnotationType::Deletion,
            AnnotationKind::Insertion { .. } => AnnotationType::Insertion,
            AnnotationKind::Replacement { .. } => AnnotationType::Replacement,
            AnnotationKind::Comment { .. } => AnnotationType::Comment,
            AnnotationKind::GlobalComment { .. } => AnnotationType::GlobalComment,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            AnnotationKind::Deletion => None,
            AnnotationKind::Insertion { text }
            | AnnotationKind::Replacement { text }
            | AnnotationKind::Comment { text }
            | AnnotationKind::GlobalComment { text } => Some(text),
        }
    }

    /// Kinds that must carry the exact text they were created against.
    ///
    /// Insertions usually do as well, but an empty `originalText` is valid
    /// for them.
    pub fn has_span(&self) -> bool {
        !matches!(
            self,
            AnnotationKind::Insertion { .. } | AnnotationKind::GlobalComment { .. }
        )
    }

    fn from_wire(kind: AnnotationType, text: Option<String>) -> Result<Self, AnnotationError> {
        match (kind, text) {
            (AnnotationType::Deletion, None) => Ok(AnnotationKind::Deletion),
            (AnnotationType::Deletion, Some(_)) => Err(AnnotationError::UnexpectedText),
            (kind, None) => Err(AnnotationError::MissingText(kind)),
            (AnnotationType::Insertion, Some(text)) => Ok(AnnotationKind::Insertion { text }),
            (AnnotationType::Replacement, Some(text)) => Ok(AnnotationKind::Replacement { text }),
            (AnnotationType::Comment, Some(text)) => Ok(AnnotationKind::Comment { text }),
            (AnnotationType::GlobalComment, Some(text)) => {
                Ok(AnnotationKind::GlobalComment { text })
            }
        }
    }
}

/// Structural re-anchoring hint for one end of a highlighted range.
///
/// `parent_index` counts elements with the same tag in document order under the
/// rendered root; `text_offset` is measured in characters within that
/// element's text content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomMeta {
    pub parent_tag_name: String,
    pub parent_index: usize,
    pub text_offset: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("{0:?} annotation requires text")]
    MissingText(AnnotationType),
    #[error("DELETION annotation must not carry text")]
    UnexpectedText,
    #[error("{0:?} annotation requires the original text it was made against")]
    MissingOriginalText(AnnotationType),
}

/// A single piece of reviewer feedback anchored to a span of one block.
///
/// Offsets count characters in the rendered block text. Global comments use an
/// empty `block_id` and zero offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnnotationRecord", into = "AnnotationRecord")]
pub struct Annotation {
    pub id: String,
    pub block_id: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub kind: AnnotationKind,
    pub original_text: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub author: Option<String>,
    pub start_meta: Option<DomMeta>,
    pub end_meta: Option<DomMeta>,
}

impl Annotation {
    pub fn annotation_type(&self) -> AnnotationType {
        self.kind.annotation_type()
    }

    pub fn text(&self) -> Option<&str> {
        self.kind.text()
    }

    pub fn is_global(&self) -> bool {
        matches!(self.kind, AnnotationKind::GlobalComment { .. })
    }

    /// Whether there is document text to highlight for this annotation.
    pub fn is_anchored(&self) -> bool {
        !self.is_global() && !self.original_text.is_empty()
    }
}

/// Flat JSON shape shared with the desktop and web clients.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotationRecord {
    id: String,
    #[serde(default)]
    block_id: String,
    #[serde(default)]
    start_offset: usize,
    #[serde(default)]
    end_offset: usize,
    #[serde(rename = "type")]
    kind: AnnotationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default)]
    original_text: String,
    #[serde(default)]
    created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_meta: Option<DomMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_meta: Option<DomMeta>,
}

impl TryFrom<AnnotationRecord> for Annotation {
    type Error = AnnotationError;

    fn try_from(r: AnnotationRecord) -> Result<Self, Self::Error> {
        let kind = AnnotationKind::from_wire(r.kind, r.text)?;
        if kind.has_span() && r.original_text.is_empty() {
            return Err(AnnotationError::MissingOriginalText(r.kind));
        }
        Ok(Annotation {
            id: r.id,
            block_id: r.block_id,
            start_offset: r.start_offset,
            end_offset: r.end_offset,
            kind,
            original_text: r.original_text,
            created_at: r.created_at,
            author: r.author,
            start_meta: r.start_meta,
            end_meta: r.end_meta,
        })
    }
}

impl From<Annotation> for AnnotationRecord {
    fn from(a: Annotation) -> Self {
        let kind = a.annotation_type();
        let text = a.kind.text().map(str::to_string);
        AnnotationRecord {
            id: a.id,
            block_id: a.block_id,
            start_offset: a.start_offset,
            end_offset: a.end_offset,
            kind,
            text,
            original_text: a.original_text,
            created_at: a.created_at,
            author: a.author,
            start_meta: a.start_meta,
            end_meta: a.end_meta,
        }
    }
}
