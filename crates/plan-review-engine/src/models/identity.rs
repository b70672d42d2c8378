use rand::Rng;
use serde::{Deserialize, Serialize};

/// Palette reviewers' highlights are drawn from.
pub const AUTHOR_COLORS: [&str; 8] = [
    "#3B82F6", // blue
    "#10B981", // green
    "#F59E0B", // amber
    "#EF4444", // red
    "#8B5CF6", // purple
    "#EC4899", // pink
    "#06B6D4", // cyan
    "#F97316", // orange
];

/// A reviewer's display name and highlight colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIdentity {
    pub name: String,
    pub color: String,
}

impl AuthorIdentity {
    /// A new identity with a colour picked at random from [`AUTHOR_COLORS`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: random_color(),
        }
    }
}

pub fn random_color() -> String {
    let idx = rand::rng().random_range(0..AUTHOR_COLORS.len());
    AUTHOR_COLORS[idx].to_string()
}
