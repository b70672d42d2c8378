//! Renders review annotations as a markdown document for the plan's author.

use std::fmt::Write;

use crate::models::{Annotation, AnnotationKind};
use crate::parsing::blocks::Block;

/// Returned instead of a document when there is nothing to report.
pub const NO_CHANGES: &str = "No changes requested.";

/// Builds the feedback document.
///
/// Annotations are ordered by the position of their block in `blocks`, then by
/// start offset. Annotations whose block is not in `blocks`, such as global
/// comments, come first. Equal keys keep their input order.
pub fn export_feedback(blocks: &[Block], annotations: &[Annotation]) -> String {
    if annotations.is_empty() {
        return NO_CHANGES.to_string();
    }

    let block_index = |a: &Annotation| -> isize {
        blocks
            .iter()
            .position(|b| b.id == a.block_id)
            .map_or(-1, |i| i as isize)
    };
    let mut sorted: Vec<&Annotation> = annotations.iter().collect();
    sorted.sort_by_key(|a| (block_index(a), a.start_offset));

    let count = annotations.len();
    let mut out = String::from("# Plan Feedback\n\n");
    let _ = writeln!(
        out,
        "I've reviewed this plan and have {count} piece{} of feedback:\n",
        if count > 1 { "s" } else { "" }
    );

    for (i, a) in sorted.into_iter().enumerate() {
        let _ = write!(out, "## {}. ", i + 1);
        write_section(&mut out, a);
        out.push('\n');
    }
    out.push_str("---\n");
    out
}

fn write_section(out: &mut String, a: &Annotation) {
    let original = &a.original_text;
    let _ = match &a.kind {
        AnnotationKind::Deletion => writeln!(
            out,
            "Remove this\n```\n{original}\n```\n> I don't want this in the plan."
        ),
        AnnotationKind::Insertion { text } => writeln!(out, "Add this\n```\n{text}\n```"),
        AnnotationKind::Replacement { text } => writeln!(
            out,
            "Change this\n**From:**\n```\n{original}\n```\n**To:**\n```\n{text}\n```"
        ),
        AnnotationKind::Comment { text } => {
            writeln!(out, "Feedback on: \"{original}\"\n> {text}")
        }
        AnnotationKind::GlobalComment { text } => {
            writeln!(out, "General feedback about the plan\n> {text}")
        }
    };
}
