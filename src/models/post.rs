//! Posts and their content rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum post length in characters.
pub const MAX_POST_LEN: usize = 600;

/// A user-authored content unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Database row ID, referenced by the client scripts via data attributes.
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Validate content for creation or editing: non-empty after trimming
    /// and at most [`MAX_POST_LEN`] characters.
    pub fn valid_content(content: &str) -> bool {
        let trimmed = content.trim();
        !trimmed.is_empty() && trimmed.chars().count() <= MAX_POST_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_content() {
        assert!(Post::valid_content("hello"));
        assert!(Post::valid_content(&"x".repeat(crate::models::MAX_POST_LEN)));
        assert!(!Post::valid_content(""));
        assert!(!Post::valid_content("   "));
        assert!(!Post::valid_content(&"x".repeat(crate::models::MAX_POST_LEN + 1)));
    }

    #[test]
    fn test_valid_content_counts_chars_not_bytes() {
        // 600 multibyte characters are within the limit
        assert!(Post::valid_content(&"ü".repeat(600)));
    }
}
