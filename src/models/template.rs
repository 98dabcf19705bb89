// src/models/template.rs

//! Post templates.

use serde::{Deserialize, Serialize};

/// A post template; `content` may embed `{variable}` placeholders that the
/// backend substitutes when rendering previews and posts. At most one
/// template is active at a time (server-enforced).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub content: String,

    #[serde(default)]
    pub is_active: bool,
}

impl Template {
    /// Truncated content for the table column.
    pub fn content_preview(&self) -> String {
        const MAX: usize = 50;
        if self.content.chars().count() > MAX {
            let cut: String = self.content.chars().take(MAX).collect();
            format!("{cut}...")
        } else {
            self.content.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_untouched() {
        let t = Template {
            id: 1,
            name: "n".into(),
            content: "hello".into(),
            is_active: false,
        };
        assert_eq!(t.content_preview(), "hello");
    }

    #[test]
    fn test_long_content_truncated() {
        let t = Template {
            id: 1,
            name: "n".into(),
            content: "x".repeat(80),
            is_active: false,
        };
        assert_eq!(t.content_preview(), format!("{}...", "x".repeat(50)));
    }
}
