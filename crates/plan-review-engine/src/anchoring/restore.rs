use crate::models::Annotation;

use super::surface::HighlightSurface;

/// How one persisted annotation was (or was not) put back on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Its highlight was still mounted; only the kind class was refreshed.
    AlreadyPresent,
    /// Rebuilt from the stored structural hints.
    Structural,
    /// Found by searching the document text.
    TextSearch,
    /// Global comments, and insertions saved without their anchor text.
    Skipped,
    /// The text is gone; the annotation is kept but not highlighted.
    Unanchored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub outcomes: Vec<(String, RestoreOutcome)>,
}

impl RestoreReport {
    pub fn count(&self, outcome: RestoreOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }

    pub fn unanchored(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == RestoreOutcome::Unanchored)
            .map(|(id, _)| id.as_str())
    }
}

/// Re-establishes highlights for persisted annotations on a fresh surface.
///
/// Tries, in order: an existing highlight with the same id, the structural
/// hints, then the first occurrence of the original text. Running it twice
/// leaves the surface unchanged the second time.
pub fn restore_highlights<S: HighlightSurface>(
    surface: &mut S,
    annotations: &[Annotation],
) -> RestoreReport {
    let mut report = RestoreReport::default();
    for annotation in annotations {
        let outcome = restore_one(surface, annotation);
        if outcome == RestoreOutcome::Unanchored {
            log::warn!(
                "could not re-anchor annotation {} ({:?}): {:?} not found",
                annotation.id,
                annotation.annotation_type(),
                annotation.original_text
            );
        }
        report.outcomes.push((annotation.id.clone(), outcome));
    }
    log::debug!(
        "restored {} of {} annotations",
        report.outcomes.len() - report.count(RestoreOutcome::Unanchored),
        report.outcomes.len()
    );
    report
}

fn restore_one<S: HighlightSurface>(surface: &mut S, a: &Annotation) -> RestoreOutcome {
    if !a.is_anchored() {
        return RestoreOutcome::Skipped;
    }
    let kind = a.annotation_type();
    if surface.has_highlight(&a.id) {
        surface.apply_kind(&a.id, kind);
        return RestoreOutcome::AlreadyPresent;
    }

    let outcome = match (&a.start_meta, &a.end_meta) {
        (Some(start), Some(end)) if surface.wrap_from_meta(&a.id, start, end, &a.original_text) => {
            RestoreOutcome::Structural
        }
        _ if surface.wrap_first_occurrence(&a.id, &a.original_text) => RestoreOutcome::TextSearch,
        _ => return RestoreOutcome::Unanchored,
    };
    surface.apply_kind(&a.id, kind);
    outcome
}
