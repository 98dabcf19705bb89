// src/panels/history.rs

//! Publication history panel with page navigation and filters.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Localizer;
use crate::models::{HistoryPage, HistoryQuery};
use crate::panels::Panel;
use crate::services::ApiClient;

/// Paged history view. The current query (page, filters) lives inside the
/// panel so a background refresh re-fetches the page the user is on.
///
/// Navigation is gated on the most recent fetch: a next page is presumed
/// to exist only while the last fetched page came back full. The gate
/// disarms after each move and re-arms on the following fetch.
pub struct HistoryPanel {
    query: Mutex<HistoryQuery>,
    last_returned: Mutex<Option<usize>>,
}

impl HistoryPanel {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: Mutex::new(HistoryQuery::new(page_size)),
            last_returned: Mutex::new(None),
        }
    }

    pub fn query(&self) -> HistoryQuery {
        self.query.lock().unwrap().clone()
    }

    pub fn page(&self) -> usize {
        self.query.lock().unwrap().page
    }

    /// Restore a page position (1-based) from persisted state.
    pub fn set_page(&self, page: usize) {
        self.query.lock().unwrap().page = page.max(1);
    }

    /// Whether any page has been fetched since the last navigation.
    pub fn fetched(&self) -> bool {
        self.last_returned.lock().unwrap().is_some()
    }

    /// Whether the last fetched page was full, i.e. a next page is
    /// presumed to exist. False until a fetch arms the gate.
    pub fn has_next(&self) -> bool {
        let page_size = self.query.lock().unwrap().page_size;
        *self.last_returned.lock().unwrap() == Some(page_size)
    }

    /// Move one page forward; refused unless the last fetched page came
    /// back full. Returns whether the page actually changed.
    pub fn next_page(&self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.query.lock().unwrap().page += 1;
        *self.last_returned.lock().unwrap() = None;
        true
    }

    /// Move one page back; refused on page 1. Returns whether the page
    /// actually changed.
    pub fn prev_page(&self) -> bool {
        {
            let mut query = self.query.lock().unwrap();
            if query.page <= 1 {
                return false;
            }
            query.page -= 1;
        }
        *self.last_returned.lock().unwrap() = None;
        true
    }

    /// Replace the filters and reset to the first page.
    pub fn set_filters(
        &self,
        status: Option<String>,
        search: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) {
        let mut query = self.query.lock().unwrap();
        query.page = 1;
        query.status = status;
        query.search = search;
        query.start_date = start_date;
        query.end_date = end_date;
        *self.last_returned.lock().unwrap() = None;
    }

    fn note_returned(&self, count: usize) {
        *self.last_returned.lock().unwrap() = Some(count);
    }
}

#[async_trait]
impl Panel for HistoryPanel {
    type Data = HistoryPage;
    type Snapshot = HistoryPage;

    fn name(&self) -> &'static str {
        "history"
    }

    async fn fetch(&self, api: &ApiClient) -> Result<HistoryPage> {
        let query = self.query();
        let records = api.history(&query).await?;
        self.note_returned(records.len());
        Ok(HistoryPage {
            records,
            page: query.page,
            page_size: query.page_size,
        })
    }

    fn project(&self, data: &HistoryPage) -> HistoryPage {
        data.clone()
    }

    fn render(&self, data: &HistoryPage, i18n: &Localizer) -> String {
        if data.records.is_empty() {
            return i18n.t("history.empty").to_string();
        }
        let mut lines = vec![format!(
            "{} | {} | {} | {} | {}",
            i18n.t("history.table.time"),
            i18n.t("history.table.group"),
            i18n.t("history.table.status"),
            i18n.t("history.table.retries"),
            i18n.t("history.table.error"),
        )];
        for record in &data.records {
            let status = if record.is_success() {
                i18n.t("history.status.success")
            } else {
                i18n.t("history.status.error")
            };
            lines.push(format!(
                "{} | {} | {status} | {} | {}",
                record.published_at,
                record.chat_label(),
                record.retry_count,
                record.error_message.as_deref().unwrap_or("-"),
            ));
        }
        lines.push(data.page_label());
        lines.join("\n")
    }
}
