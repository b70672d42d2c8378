/// Fenced code block delimiters.
///
/// Only backtick fences open a code block. Everything between the opener and
/// the closer is a raw zone and never classified.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// True if the trimmed line starts with a backtick fence.
    pub fn is_fence(line: &str) -> bool {
        line.trim().starts_with(Self::BACKTICKS)
    }

    /// Language tag following an opening fence, if any.
    pub fn language(line: &str) -> Option<String> {
        let rest = line.trim().strip_prefix(Self::BACKTICKS)?.trim();
        (!rest.is_empty()).then(|| rest.to_string())
    }

    /// A fence line closes an open code block regardless of its trailing text.
    pub fn closes(line: &str) -> bool {
        Self::is_fence(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        assert!(CodeFence::is_fence("```rust"));
        assert!(CodeFence::is_fence("   ```"));
    }

    #[test]
    fn tildes_are_not_fences() {
        assert!(!CodeFence::is_fence("~~~"));
    }

    #[test]
    fn no_fence() {
        assert!(!CodeFence::is_fence("hello"));
    }

    #[test]
    fn language_tag() {
        assert_eq!(CodeFence::language("```ts"), Some("ts".to_string()));
        assert_eq!(CodeFence::language("```  rust  "), Some("rust".to_string()));
        assert_eq!(CodeFence::language("```"), None);
    }
}
