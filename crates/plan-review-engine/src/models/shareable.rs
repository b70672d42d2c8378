use serde::{Deserialize, Serialize};

use super::annotation::Annotation;

/// An annotation as carried in a share link, stamped with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareableAnnotation {
    #[serde(flatten)]
    pub annotation: Annotation,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_color: Option<String>,
}

impl ShareableAnnotation {
    pub fn id(&self) -> &str {
        &self.annotation.id
    }
}

/// Plan content plus every reviewer's annotations, as encoded into a link.
///
/// Each re-share produces a new value with `version` bumped by one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareablePlan {
    pub title: String,
    pub content: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_at: Option<i64>,
    #[serde(default)]
    pub annotations: Vec<ShareableAnnotation>,
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::AnnotationKind;
    use serde_json::json;

    #[test]
    fn author_fields_sit_beside_annotation_fields() {
        let shared = ShareableAnnotation {
            annotation: Annotation {
                id: "c-1".into(),
                block_id: "block-1".into(),
                start_offset: 2,
                end_offset: 6,
                kind: AnnotationKind::Comment { text: "why?".into() },
                original_text: "this".into(),
                created_at: 1,
                author: Some("ana".into()),
                start_meta: None,
                end_meta: None,
            },
            author_name: "ana".into(),
            author_color: Some("#3B82F6".into()),
        };

        let value = serde_json::to_value(&shared).unwrap();
        assert_eq!(value["type"], json!("COMMENT"));
        assert_eq!(value["authorName"], json!("ana"));
        assert_eq!(value["text"], json!("why?"));

        let back: ShareableAnnotation = serde_json::from_value(value).unwrap();
        assert_eq!(back, shared);
    }
}
