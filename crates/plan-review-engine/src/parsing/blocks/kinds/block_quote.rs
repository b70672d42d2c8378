/// Blockquote line syntax.
///
/// Each quoted line becomes its own block; consecutive quote lines are not
/// merged.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Returns the quoted text if the trimmed line starts with `>`.
    ///
    /// Only the first `>` and the whitespace after it are stripped, so
    /// `>> nested` yields `> nested`.
    pub fn strip_prefix(trimmed: &str) -> Option<&str> {
        trimmed
            .strip_prefix(Self::PREFIX)
            .map(|rest| rest.trim_start())
    }
}
