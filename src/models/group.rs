// src/models/group.rs

//! Group/channel entries.

use serde::{Deserialize, Serialize};

/// A group or channel the bot publishes to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Chat identifier (numeric ID as the backend reports it)
    pub id: serde_json::Value,

    /// Chat title
    #[serde(default)]
    pub title: Option<String>,

    /// Public @username, if any
    #[serde(default)]
    pub username: Option<String>,

    /// Timestamp of the last publication, backend-formatted
    #[serde(default)]
    pub last_post: Option<String>,

    /// Publishing to this chat is paused
    #[serde(default)]
    pub is_disabled: bool,
}

impl Group {
    /// Chat id as a plain string, for URLs and display.
    pub fn id_str(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// The groups endpoint returns either `{"groups": [...]}` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GroupsPayload {
    Wrapped { groups: Vec<Group> },
    Bare(Vec<Group>),
}

impl GroupsPayload {
    pub fn into_groups(self) -> Vec<Group> {
        match self {
            GroupsPayload::Wrapped { groups } => groups,
            GroupsPayload::Bare(groups) => groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_payload() {
        let json = r#"{"groups": [{"id": 1, "title": "A", "is_disabled": false}]}"#;
        let payload: GroupsPayload = serde_json::from_str(json).unwrap();
        let groups = payload.into_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id_str(), "1");
    }

    #[test]
    fn test_bare_array_payload() {
        let json = r#"[{"id": "-100500", "title": "B"}]"#;
        let payload: GroupsPayload = serde_json::from_str(json).unwrap();
        let groups = payload.into_groups();
        assert_eq!(groups[0].id_str(), "-100500");
        assert!(!groups[0].is_disabled);
    }
}
