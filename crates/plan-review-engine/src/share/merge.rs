use chrono::Utc;

use crate::models::{Annotation, AuthorIdentity, ShareableAnnotation, ShareablePlan, random_color};

/// Name used when neither the annotation nor the sharer has one.
pub const ANONYMOUS: &str = "Anonymous";

/// Appends the incoming annotations whose id is not already present.
///
/// Each added annotation is stamped with `author_name` and `author_color`.
/// Only ids are compared, so two annotations on the same span with different
/// ids both survive.
pub fn merge_annotations(
    existing: &[ShareableAnnotation],
    incoming: &[Annotation],
    author_name: &str,
    author_color: &str,
) -> Vec<ShareableAnnotation> {
    let mut merged = existing.to_vec();
    for annotation in incoming {
        if merged.iter().any(|e| e.id() == annotation.id) {
            continue;
        }
        merged.push(ShareableAnnotation {
            annotation: Annotation {
                author: Some(author_name.to_string()),
                ..annotation.clone()
            },
            author_name: author_name.to_string(),
            author_color: Some(author_color.to_string()),
        });
    }
    merged
}

/// First share of a plan.
pub fn create_shareable_plan(
    content: &str,
    title: &str,
    annotations: &[Annotation],
    shared_by: Option<&str>,
    author_color: Option<&str>,
) -> ShareablePlan {
    let now = Utc::now().timestamp_millis();
    ShareablePlan {
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
        shared_by: shared_by.map(str::to_string),
        shared_at: Some(now),
        annotations: annotations
            .iter()
            .map(|a| ShareableAnnotation {
                author_name: a
                    .author
                    .as_deref()
                    .or(shared_by)
                    .unwrap_or(ANONYMOUS)
                    .to_string(),
                author_color: author_color.map(str::to_string),
                annotation: a.clone(),
            })
            .collect(),
        version: 1,
    }
}

/// A new version of `plan` carrying the reviewer's local annotations.
///
/// `plan` itself is left untouched. Without an identity the annotations are
/// attributed to "Anonymous" with a random colour and `shared_by` keeps the
/// previous sharer.
pub fn reshare(
    plan: &ShareablePlan,
    local: &[Annotation],
    identity: Option<&AuthorIdentity>,
) -> ShareablePlan {
    let (name, color) = match identity {
        Some(id) => (id.name.clone(), id.color.clone()),
        None => (ANONYMOUS.to_string(), random_color()),
    };
    ShareablePlan {
        annotations: merge_annotations(&plan.annotations, local, &name, &color),
        version: plan.version.saturating_add(1),
        shared_by: identity.map(|id| id.name.clone()).or_else(|| plan.shared_by.clone()),
        shared_at: Some(Utc::now().timestamp_millis()),
        ..plan.clone()
    }
}
