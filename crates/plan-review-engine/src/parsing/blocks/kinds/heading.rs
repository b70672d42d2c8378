/// ATX heading syntax: one to six `#` followed by whitespace.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Parses a line into `(level, text)`.
    ///
    /// Only leading whitespace may be stripped beforehand: the whitespace
    /// after the markers is significant, so `"# "` is an empty heading.
    pub fn parse(line: &str) -> Option<(usize, &str)> {
        let level = line.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let rest = &line[level..];
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some((level, rest.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_levels() {
        assert_eq!(Heading::parse("# Title"), Some((1, "Title")));
        assert_eq!(Heading::parse("### Deep  "), Some((3, "Deep")));
        assert_eq!(Heading::parse("###### Six"), Some((6, "Six")));
    }

    #[test]
    fn seven_markers_is_not_a_heading() {
        assert_eq!(Heading::parse("####### Seven"), None);
    }

    #[test]
    fn marker_needs_whitespace() {
        assert_eq!(Heading::parse("#hashtag"), None);
        assert_eq!(Heading::parse("#"), None);
    }

    #[test]
    fn trailing_whitespace_makes_an_empty_heading() {
        assert_eq!(Heading::parse("# "), Some((1, "")));
        assert_eq!(Heading::parse("##\t"), Some((2, "")));
    }
}
