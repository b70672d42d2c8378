/// Horizontal rule: a line that is exactly `---` or `***` once trimmed.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: [&'static str; 2] = ["---", "***"];

    pub fn matches(trimmed: &str) -> bool {
        Self::MARKERS.contains(&trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_markers_only() {
        assert!(ThematicBreak::matches("---"));
        assert!(ThematicBreak::matches("***"));
        assert!(!ThematicBreak::matches("----"));
        assert!(!ThematicBreak::matches("- - -"));
    }
}
