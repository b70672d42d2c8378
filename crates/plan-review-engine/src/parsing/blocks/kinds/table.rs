use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|?.+\|.+\|?$").expect("table row pattern is valid"));

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[|\-:\s]+$").expect("table separator pattern is valid"));

/// Pipe table rows.
pub struct TableRow;

impl TableRow {
    pub const PIPE: char = '|';

    /// True for a line that starts with `|` or holds at least two pipe-separated columns.
    pub fn matches(trimmed: &str) -> bool {
        trimmed.starts_with(Self::PIPE) || (trimmed.contains(Self::PIPE) && ROW.is_match(trimmed))
    }

    /// Separator rows like `|---|:--:|` carry no cells.
    pub fn is_separator(trimmed: &str) -> bool {
        SEPARATOR.is_match(trimmed)
    }

    /// Strips one leading and one trailing pipe, then splits and trims cells.
    pub fn cells(line: &str) -> Vec<String> {
        let line = line.trim();
        let line = line.strip_prefix(Self::PIPE).unwrap_or(line);
        let line = line.strip_suffix(Self::PIPE).unwrap_or(line);
        line.split(Self::PIPE).map(|c| c.trim().to_string()).collect()
    }
}

/// Header and body cells of a table block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Splits a table block's raw content into cells.
///
/// The first non-blank line is the header; separator rows are skipped.
pub fn parse_table(content: &str) -> Table {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return Table::default();
    };

    Table {
        headers: TableRow::cells(header),
        rows: lines
            .filter(|l| !TableRow::is_separator(l.trim()))
            .map(TableRow::cells)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn row_detection() {
        assert!(TableRow::matches("| a | b |"));
        assert!(TableRow::matches("a | b"));
        assert!(TableRow::matches("|"));
        assert!(!TableRow::matches("a |"));
        assert!(!TableRow::matches("plain text"));
    }

    #[test]
    fn separator_detection() {
        assert!(TableRow::is_separator("|---|:---:|"));
        assert!(TableRow::is_separator("--- | ---"));
        assert!(!TableRow::is_separator("| a | b |"));
    }

    #[test]
    fn parse_skips_separator_rows() {
        let table = parse_table("| Step | Owner |\n|------|-------|\n| Build | ci |\n| Ship | me |");
        assert_eq!(table.headers, vec!["Step", "Owner"]);
        assert_eq!(
            table.rows,
            vec![vec!["Build".to_string(), "ci".into()], vec!["Ship".into(), "me".into()]]
        );
    }

    #[test]
    fn parse_without_outer_pipes() {
        let table = parse_table("a | b\n1 | 2");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "2".into()]]);
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse_table(""), Table::default());
    }
}
