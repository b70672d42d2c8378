use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text with its line terminator (`\n` or `\r\n`) removed.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so spans include the newline characters and consecutive
/// line spans tile the whole rope.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(idx, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            number: idx + 1,
            span: Span { start, end: offset },
            text: line.trim_end_matches(['\r', '\n']).to_string(),
        }
    })
}
