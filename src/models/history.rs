// src/models/history.rs

//! Publication history records and pagination.

use serde::{Deserialize, Serialize};

/// One publication attempt from `/api/publication_history`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    #[serde(default)]
    pub published_at: String,

    #[serde(default)]
    pub chat_id: Option<serde_json::Value>,

    #[serde(default)]
    pub chat_title: Option<String>,

    #[serde(default)]
    pub chat_username: Option<String>,

    /// `"success"` or anything else (treated as an error)
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub retry_count: u32,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl HistoryRecord {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Best display name for the target chat: title, then username, then id.
    pub fn chat_label(&self) -> String {
        if let Some(title) = self.chat_title.as_deref().filter(|s| !s.is_empty()) {
            return title.to_string();
        }
        if let Some(username) = self.chat_username.as_deref().filter(|s| !s.is_empty()) {
            return username.to_string();
        }
        match &self.chat_id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        }
    }
}

/// Query parameters for a history page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// 1-based page index
    pub page: usize,
    pub page_size: usize,
    pub status: Option<String>,
    pub search: Option<String>,
    /// Date only (YYYY-MM-DD); expanded to day bounds in the query string
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self::new(20)
    }
}

impl HistoryQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            status: None,
            search: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Query pairs for the history endpoint. Date filters are widened to
    /// the full day on each end.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("limit".to_string(), self.page_size.to_string()),
            (
                "offset".to_string(),
                (self.page.saturating_sub(1) * self.page_size).to_string(),
            ),
        ];
        if let Some(status) = &self.status {
            params.push(("status".to_string(), status.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(start) = &self.start_date {
            params.push(("start_date".to_string(), format!("{start} 00:00:00")));
        }
        if let Some(end) = &self.end_date {
            params.push(("end_date".to_string(), format!("{end} 23:59:59")));
        }
        params
    }
}

/// One fetched page of history together with its query position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage {
    pub records: Vec<HistoryRecord>,
    pub page: usize,
    pub page_size: usize,
}

impl HistoryPage {
    /// Heuristic: the backend sends no total count, so a full page is
    /// assumed to have a successor. A final page whose length happens to
    /// equal the page size yields one empty extra page; known imprecision,
    /// kept for compatibility with the backend contract.
    pub fn has_more(&self) -> bool {
        self.records.len() == self.page_size
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// `"current / reachable"` label, e.g. `"2 / 3"` while a next page is
    /// presumed to exist.
    pub fn page_label(&self) -> String {
        let last = if self.has_more() {
            self.page + 1
        } else {
            self.page
        };
        format!("{} / {}", self.page, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> HistoryRecord {
        HistoryRecord {
            published_at: "2026-08-01 10:00:00".into(),
            chat_id: Some(serde_json::json!(1)),
            chat_title: Some("Chat".into()),
            chat_username: None,
            status: status.into(),
            retry_count: 0,
            error_message: None,
        }
    }

    #[test]
    fn test_full_page_has_more() {
        let page = HistoryPage {
            records: vec![record("success"); 20],
            page: 1,
            page_size: 20,
        };
        assert!(page.has_more());
        assert!(!page.can_prev());
        assert_eq!(page.page_label(), "1 / 2");
    }

    #[test]
    fn test_short_page_is_last() {
        let page = HistoryPage {
            records: vec![record("success"); 7],
            page: 3,
            page_size: 20,
        };
        assert!(!page.has_more());
        assert!(page.can_prev());
        assert_eq!(page.page_label(), "3 / 3");
    }

    #[test]
    fn test_query_params_offset_and_dates() {
        let query = HistoryQuery {
            page: 2,
            page_size: 20,
            status: Some("error".into()),
            search: None,
            start_date: Some("2026-08-01".into()),
            end_date: Some("2026-08-10".into()),
        };
        let params = query.to_params();
        assert!(params.contains(&("limit".into(), "20".into())));
        assert!(params.contains(&("offset".into(), "20".into())));
        assert!(params.contains(&("start_date".into(), "2026-08-01 00:00:00".into())));
        assert!(params.contains(&("end_date".into(), "2026-08-10 23:59:59".into())));
    }

    #[test]
    fn test_default_query_starts_on_page_one() {
        let query = HistoryQuery::default();
        assert_eq!(query.page, 1);
        let params = query.to_params();
        assert!(params.contains(&("offset".into(), "0".into())));
    }

    #[test]
    fn test_chat_label_fallbacks() {
        let mut r = record("success");
        assert_eq!(r.chat_label(), "Chat");
        r.chat_title = None;
        r.chat_username = Some("@chan".into());
        assert_eq!(r.chat_label(), "@chan");
        r.chat_username = None;
        assert_eq!(r.chat_label(), "1");
    }
}
