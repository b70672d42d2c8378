//! Selection lifecycle of one review view.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::anchoring::{Anchor, AnchorError, HighlightSurface, RestoreReport, restore_highlights};
use crate::models::{Annotation, AnnotationKind};
use crate::parsing::blocks::Block;

/// A highlighted selection waiting for the reviewer to choose what it means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSpan {
    pub highlight_id: String,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    AwaitingDecision(PendingSpan),
    Restoring,
}

/// What the reviewer chose for the pending span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Delete,
    Insert(String),
    Replace(String),
    Comment(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("highlights are being restored")]
    Restoring,
    #[error("no selection is awaiting a decision")]
    NoPendingSelection,
    #[error("feedback text is empty")]
    EmptyText,
    #[error("block {0} does not exist")]
    UnknownBlock(String),
    #[error("annotation {0} does not exist")]
    UnknownAnnotation(String),
    #[error(transparent)]
    Anchor(#[from] AnchorError),
}

/// Owns the annotation list of a plan under review and the selection state.
///
/// Highlights created while restoring are never mistaken for new selections:
/// the surface's created events are discarded when the restore completes.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    blocks: Vec<Block>,
    annotations: Vec<Annotation>,
    state: SelectionState,
    author: Option<String>,
}

impl ReviewSession {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            annotations: vec![],
            state: SelectionState::Idle,
            author: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn into_annotations(self) -> Vec<Annotation> {
        self.annotations
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingSpan> {
        match &self.state {
            SelectionState::AwaitingDecision(p) => Some(p),
            _ => None,
        }
    }

    /// Highlights a selection and waits for a decision on it. A previous
    /// undecided selection is discarded first.
    pub fn select<S: HighlightSurface>(
        &mut self,
        surface: &mut S,
        range: &S::Range,
    ) -> Result<&PendingSpan, SessionError> {
        if self.state == SelectionState::Restoring {
            return Err(SessionError::Restoring);
        }
        self.cancel(surface);

        let anchor = surface.capture(range)?;
        let highlight_id = Uuid::new_v4().to_string();
        surface.wrap_range(&highlight_id, range)?;
        for id in surface.drain_created() {
            log::debug!("highlight {id} created for {}", anchor.block_id);
        }

        self.state = SelectionState::AwaitingDecision(PendingSpan {
            highlight_id,
            anchor,
        });
        self.pending().ok_or(SessionError::NoPendingSelection)
    }

    /// Selects the whole rendered text of a block, as for code blocks.
    pub fn select_block<S: HighlightSurface>(
        &mut self,
        surface: &mut S,
        block_id: &str,
    ) -> Result<&PendingSpan, SessionError> {
        if !self.blocks.iter().any(|b| b.id == block_id) {
            return Err(SessionError::UnknownBlock(block_id.to_string()));
        }
        let range = surface
            .block_range(block_id)
            .ok_or_else(|| SessionError::UnknownBlock(block_id.to_string()))?;
        self.select(surface, &range)
    }

    /// Turns the pending selection into an annotation.
    ///
    /// The highlight stays and takes the decision's kind class. A decision
    /// with blank text is refused and the selection stays pending.
    pub fn decide<S: HighlightSurface>(
        &mut self,
        surface: &mut S,
        decision: Decision,
    ) -> Result<Annotation, SessionError> {
        let pending = match &self.state {
            SelectionState::AwaitingDecision(p) => p,
            SelectionState::Restoring => return Err(SessionError::Restoring),
            SelectionState::Idle => return Err(SessionError::NoPendingSelection),
        };

        let kind = match decision {
            Decision::Delete => AnnotationKind::Deletion,
            Decision::Insert(text) => AnnotationKind::Insertion {
                text: non_blank(text)?,
            },
            Decision::Replace(text) => AnnotationKind::Replacement {
                text: non_blank(text)?,
            },
            Decision::Comment(text) => AnnotationKind::Comment {
                text: non_blank(text)?,
            },
        };

        let PendingSpan {
            highlight_id,
            anchor,
        } = pending.clone();
        self.state = SelectionState::Idle;

        surface.apply_kind(&highlight_id, kind.annotation_type());

        let annotation = Annotation {
            id: highlight_id,
            block_id: anchor.block_id,
            start_offset: anchor.start_offset,
            end_offset: anchor.end_offset,
            kind,
            original_text: anchor.original_text,
            created_at: Utc::now().timestamp_millis(),
            author: self.author.clone(),
            start_meta: anchor.start_meta,
            end_meta: anchor.end_meta,
        };
        log::info!(
            "added {:?} annotation {} on {}",
            annotation.annotation_type(),
            annotation.id,
            annotation.block_id
        );
        self.annotations.push(annotation.clone());
        Ok(annotation)
    }

    /// Drops the pending selection and its highlight. Returns false when idle.
    pub fn cancel<S: HighlightSurface>(&mut self, surface: &mut S) -> bool {
        let SelectionState::AwaitingDecision(pending) = &self.state else {
            return false;
        };
        surface.remove_highlight(&pending.highlight_id);
        self.state = SelectionState::Idle;
        true
    }

    /// Enters the restoring state, discarding any pending selection.
    pub fn begin_restore<S: HighlightSurface>(&mut self, surface: &mut S) -> Result<(), SessionError> {
        if self.state == SelectionState::Restoring {
            return Err(SessionError::Restoring);
        }
        self.cancel(surface);
        self.state = SelectionState::Restoring;
        Ok(())
    }

    /// Replaces the annotation list with `persisted`, re-highlights it and
    /// returns to idle.
    pub fn complete_restore<S: HighlightSurface>(
        &mut self,
        surface: &mut S,
        persisted: Vec<Annotation>,
    ) -> RestoreReport {
        let report = restore_highlights(surface, &persisted);
        let suppressed = surface.drain_created().len();
        log::debug!("suppressed {suppressed} highlight events raised by restore");
        self.annotations = persisted;
        self.state = SelectionState::Idle;
        report
    }

    pub fn restore<S: HighlightSurface>(
        &mut self,
        surface: &mut S,
        persisted: Vec<Annotation>,
    ) -> Result<RestoreReport, SessionError> {
        self.begin_restore(surface)?;
        Ok(self.complete_restore(surface, persisted))
    }

    /// Removes an annotation and unwraps its highlight.
    pub fn remove_annotation<S: HighlightSurface>(
        &mut self,
        surface: &mut S,
        id: &str,
    ) -> Result<Annotation, SessionError> {
        let index = self
            .annotations
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| SessionError::UnknownAnnotation(id.to_string()))?;
        surface.remove_highlight(id);
        Ok(self.annotations.remove(index))
    }

    /// Adds a comment about the plan as a whole.
    pub fn add_global_comment(&mut self, text: &str) -> Result<Annotation, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyText);
        }
        let annotation = Annotation {
            id: format!("global-{}", Uuid::new_v4()),
            block_id: String::new(),
            start_offset: 0,
            end_offset: 0,
            kind: AnnotationKind::GlobalComment {
                text: text.to_string(),
            },
            original_text: String::new(),
            created_at: Utc::now().timestamp_millis(),
            author: self.author.clone(),
            start_meta: None,
            end_meta: None,
        };
        self.annotations.push(annotation.clone());
        Ok(annotation)
    }
}

fn non_blank(text: String) -> Result<String, SessionError> {
    if text.trim().is_empty() {
        Err(SessionError::EmptyText)
    } else {
        Ok(text)
    }
}
