// src/dashboard.rs

//! Top-level orchestration: owns the API client, the panels and the
//! notification queue, and applies the cross-panel refresh rules after
//! each mutation.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::locale::{Lang, Localizer};
use crate::models::{PreviewRequest, ScheduleSpec};
use crate::panels::{
    GroupsPanel, HistoryPanel, Panel, PanelController, PreviewPanel, SchedulesPanel,
    StatisticsPanel, StatusPanel, Surface, TemplatesPanel,
};
use crate::services::{ApiClient, NoticeKind, Notifier};
use crate::state::{StateStore, UiState};

/// Panels addressable from the CLI and the refresh rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    Status,
    Groups,
    History,
    Statistics,
    Schedules,
    Templates,
    Preview,
}

impl PanelId {
    pub const ALL: [PanelId; 7] = [
        PanelId::Status,
        PanelId::Groups,
        PanelId::History,
        PanelId::Statistics,
        PanelId::Schedules,
        PanelId::Templates,
        PanelId::Preview,
    ];
}

impl FromStr for PanelId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "status" => Ok(PanelId::Status),
            "groups" => Ok(PanelId::Groups),
            "history" => Ok(PanelId::History),
            "statistics" | "stats" => Ok(PanelId::Statistics),
            "schedules" => Ok(PanelId::Schedules),
            "templates" => Ok(PanelId::Templates),
            "preview" => Ok(PanelId::Preview),
            other => Err(AppError::config(format!("unknown panel: {other}"))),
        }
    }
}

/// Unit of the interval input; hours are converted to minutes before
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Minutes,
    Hours,
}

impl FromStr for IntervalUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "minutes" | "min" | "m" => Ok(IntervalUnit::Minutes),
            "hours" | "h" => Ok(IntervalUnit::Hours),
            other => Err(AppError::config(format!("unknown interval unit: {other}"))),
        }
    }
}

/// Validate a raw interval input. The accepted range is 1..=10080 minutes
/// (7 days) after unit conversion; rejected input never reaches the
/// network. Errors carry translation keys.
pub fn parse_interval(raw: &str, unit: IntervalUnit) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation("toast.intervalNotSpecified"));
    }
    let value: i64 = raw
        .parse()
        .map_err(|_| AppError::validation("toast.invalidInterval"))?;
    if value <= 0 {
        return Err(AppError::validation("toast.invalidInterval"));
    }
    let minutes = match unit {
        IntervalUnit::Minutes => value,
        IntervalUnit::Hours => value * 60,
    };
    if minutes > 10080 {
        return Err(AppError::validation("toast.maxInterval"));
    }
    Ok(minutes as u32)
}

/// The dashboard itself.
pub struct Dashboard {
    config: Config,
    api: ApiClient,
    i18n: Localizer,
    notifier: Notifier,
    surface: Arc<dyn Surface>,
    state_store: StateStore,
    ui_state: UiState,
    status: PanelController<StatusPanel>,
    groups: PanelController<GroupsPanel>,
    history: PanelController<HistoryPanel>,
    statistics: PanelController<StatisticsPanel>,
    schedules: PanelController<SchedulesPanel>,
    templates: PanelController<TemplatesPanel>,
    preview: PanelController<PreviewPanel>,
}

impl Dashboard {
    pub fn new(config: Config, lang: Lang, surface: Arc<dyn Surface>) -> Result<Self> {
        let login_url = format!(
            "{}{}",
            config.server.base_url.trim_end_matches('/'),
            config.server.login_path
        );
        let api = ApiClient::new(&config.server)?.with_unauthorized_hook(Arc::new(move |path| {
            log::warn!("Session expired on {path}; log in at {login_url}");
        }));
        let history_page_size = config.panels.history_page_size;
        let state_store = StateStore::new(&config.panels.state_path);
        Ok(Self {
            api,
            i18n: Localizer::new(lang),
            notifier: Notifier::new(),
            surface,
            state_store,
            ui_state: UiState {
                language: lang,
                ..UiState::default()
            },
            status: PanelController::new(StatusPanel),
            groups: PanelController::new(GroupsPanel),
            history: PanelController::new(HistoryPanel::new(history_page_size)),
            statistics: PanelController::new(StatisticsPanel::new()),
            schedules: PanelController::new(SchedulesPanel),
            templates: PanelController::new(TemplatesPanel),
            preview: PanelController::new(PreviewPanel),
            config,
        })
    }

    /// Build with the persisted UI state (language unless `lang`
    /// overrides it, plus the history page position).
    pub async fn with_saved_language(
        config: Config,
        lang: Option<Lang>,
        surface: Arc<dyn Surface>,
    ) -> Result<Self> {
        let saved = StateStore::new(&config.panels.state_path)
            .load_or_default()
            .await;
        let lang = lang.unwrap_or(saved.language);
        let mut dash = Self::new(config, lang, surface)?;
        dash.history.panel().set_page(saved.history_page);
        dash.ui_state = UiState {
            language: lang,
            history_page: saved.history_page,
        };
        Ok(dash)
    }

    pub fn i18n(&self) -> &Localizer {
        &self.i18n
    }

    pub fn notifier(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Switch the UI language, persist the choice and drop every
    /// snapshot so all panels re-render in the new language.
    pub async fn set_language(&mut self, lang: Lang) -> Result<()> {
        self.i18n = Localizer::new(lang);
        self.ui_state.language = lang;
        self.state_store.save(&self.ui_state).await?;
        for id in PanelId::ALL {
            self.invalidate(id);
        }
        Ok(())
    }

    /// Persist the current language and history page; a write failure is
    /// logged, not surfaced, since the session itself keeps working.
    async fn persist_ui_state(&mut self) {
        self.ui_state.language = self.i18n.lang();
        self.ui_state.history_page = self.history.panel().page();
        if let Err(err) = self.state_store.save(&self.ui_state).await {
            log::warn!("Failed to persist UI state: {err}");
        }
    }

    pub fn invalidate(&self, id: PanelId) {
        match id {
            PanelId::Status => self.status.invalidate(),
            PanelId::Groups => self.groups.invalidate(),
            PanelId::History => self.history.invalidate(),
            PanelId::Statistics => self.statistics.invalidate(),
            PanelId::Schedules => self.schedules.invalidate(),
            PanelId::Templates => self.templates.invalidate(),
            PanelId::Preview => self.preview.invalidate(),
        }
    }

    pub async fn refresh(&self, id: PanelId) {
        let api = &self.api;
        let i18n = &self.i18n;
        let surface = self.surface.as_ref();
        match id {
            PanelId::Status => self.status.refresh(api, i18n, surface).await,
            PanelId::Groups => self.groups.refresh(api, i18n, surface).await,
            PanelId::History => self.history.refresh(api, i18n, surface).await,
            PanelId::Statistics => self.statistics.refresh(api, i18n, surface).await,
            PanelId::Schedules => self.schedules.refresh(api, i18n, surface).await,
            PanelId::Templates => self.templates.refresh(api, i18n, surface).await,
            PanelId::Preview => self.preview.refresh(api, i18n, surface).await,
        }
    }

    /// Refresh every panel; panels are independent, so the fetches run
    /// concurrently.
    pub async fn refresh_all(&self) {
        futures::future::join_all(PanelId::ALL.map(|id| self.refresh(id))).await;
    }

    /// Poll loop: status always, plus either the active panel or all of
    /// them, at the configured cadence.
    pub async fn run_watch(&self, active: Option<PanelId>) {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(self.config.poll.interval_secs.max(1)));
        loop {
            ticker.tick().await;
            self.refresh(PanelId::Status).await;
            match active {
                Some(id) if self.config.poll.active_panel_only => {
                    if id != PanelId::Status {
                        self.refresh(id).await;
                    }
                }
                _ => {
                    for id in PanelId::ALL {
                        if id != PanelId::Status {
                            self.refresh(id).await;
                        }
                    }
                }
            }
        }
    }

    // --- History navigation ---

    /// Advance one history page. The move is refused unless the last
    /// fetched page came back full; a fresh session first loads the
    /// current page to arm the gate.
    pub async fn history_next_page(&mut self) {
        if !self.history.panel().fetched() {
            self.refresh(PanelId::History).await;
        }
        if !self.history.panel().next_page() {
            let message = self.i18n.t("history.lastPage").to_string();
            self.notifier.notify(&self.i18n, &message, NoticeKind::Info);
            return;
        }
        self.history.invalidate();
        self.refresh(PanelId::History).await;
        self.persist_ui_state().await;
    }

    pub async fn history_prev_page(&mut self) {
        if !self.history.panel().prev_page() {
            let message = self.i18n.t("history.firstPage").to_string();
            self.notifier.notify(&self.i18n, &message, NoticeKind::Info);
            return;
        }
        self.history.invalidate();
        self.refresh(PanelId::History).await;
        self.persist_ui_state().await;
    }

    pub async fn history_set_filters(
        &mut self,
        status: Option<String>,
        search: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) {
        self.history
            .panel()
            .set_filters(status, search, start_date, end_date);
        self.history.invalidate();
        self.refresh(PanelId::History).await;
        self.persist_ui_state().await;
    }

    pub async fn statistics_set_range(
        &self,
        start_date: Option<String>,
        end_date: Option<String>,
    ) {
        self.statistics.panel().set_range(start_date, end_date);
        self.statistics.invalidate();
        self.refresh(PanelId::Statistics).await;
    }

    // --- Mutations ---

    pub async fn set_interval(&mut self, raw: &str, unit: IntervalUnit) {
        let minutes = match parse_interval(raw, unit) {
            Ok(minutes) => minutes,
            Err(err) => return self.reject(err),
        };
        let result = self.api.set_interval(minutes).await;
        self.finish(result, "toast.errorSetInterval", &[PanelId::Status])
            .await;
    }

    pub async fn publish_now(&mut self) {
        let result = self.api.post_now().await;
        self.finish(result, "toast.errorPublishing", &[PanelId::Status])
            .await;
    }

    pub async fn start_scheduler(&mut self) {
        let result = self.api.start_scheduler().await;
        self.finish(result, "toast.errorStartScheduler", &[PanelId::Status])
            .await;
    }

    pub async fn stop_scheduler(&mut self) {
        let result = self.api.stop_scheduler().await;
        self.finish(result, "toast.errorStopScheduler", &[PanelId::Status])
            .await;
    }

    pub async fn reload_post(&mut self) {
        let result = self.api.reload_post().await;
        self.finish(result, "toast.errorReloadPost", &[PanelId::Preview])
            .await;
    }

    pub async fn add_group(&mut self, group_input: &str) {
        if group_input.trim().is_empty() {
            return self.reject(AppError::validation("toast.enterGroup"));
        }
        let result = self.api.add_group(group_input.trim()).await;
        self.finish(
            result,
            "toast.errorAddGroup",
            &[PanelId::Groups, PanelId::Status],
        )
        .await;
    }

    pub async fn remove_group(&mut self, chat_id: &str) {
        if chat_id.trim().is_empty() {
            return self.reject(AppError::validation("toast.groupNotSpecified"));
        }
        let result = self.api.remove_group(chat_id.trim()).await;
        self.finish(
            result,
            "toast.errorAddGroup",
            &[PanelId::Groups, PanelId::Status],
        )
        .await;
    }

    pub async fn toggle_group(&mut self, chat_id: &str, is_disabled: bool) {
        let result = self.api.toggle_group_disabled(chat_id, is_disabled).await;
        self.finish(
            result,
            "toast.errorToggleGroup",
            &[PanelId::Groups, PanelId::Status],
        )
        .await;
    }

    pub async fn clear_history(&mut self) {
        let result = self.api.clear_history().await;
        self.finish(result, "error.unknown", &[PanelId::History]).await;
    }

    pub async fn create_template(&mut self, name: &str, content: &str) {
        if name.trim().is_empty() || content.trim().is_empty() {
            return self.reject(AppError::validation("templates.required"));
        }
        let result = self.api.create_template(name.trim(), content).await;
        self.finish(result, "error.unknown", &[PanelId::Templates]).await;
    }

    pub async fn update_template(&mut self, id: i64, name: &str, content: &str) {
        if name.trim().is_empty() || content.trim().is_empty() {
            return self.reject(AppError::validation("templates.required"));
        }
        let result = self.api.update_template(id, name.trim(), content).await;
        self.finish(result, "error.unknown", &[PanelId::Templates]).await;
    }

    /// Activation changes which template the backend renders posts with,
    /// so the preview refreshes as well.
    pub async fn activate_template(&mut self, id: i64) {
        let result = self.api.activate_template(id).await;
        self.finish(
            result,
            "error.unknown",
            &[PanelId::Templates, PanelId::Preview],
        )
        .await;
    }

    pub async fn delete_template(&mut self, id: i64) {
        let result = self.api.delete_template(id).await;
        self.finish(
            result,
            "error.unknown",
            &[PanelId::Templates, PanelId::Preview],
        )
        .await;
    }

    pub async fn create_schedule(&mut self, spec: ScheduleSpec, is_active: bool) {
        if let Err(err) = spec.validate() {
            return self.reject(err);
        }
        let result = self.api.create_schedule(&spec, is_active).await;
        self.finish(result, "error.unknown", &[PanelId::Schedules]).await;
    }

    pub async fn update_schedule(&mut self, id: i64, spec: ScheduleSpec, is_active: bool) {
        if let Err(err) = spec.validate() {
            return self.reject(err);
        }
        let result = self.api.update_schedule(id, &spec, is_active).await;
        self.finish(result, "error.unknown", &[PanelId::Schedules]).await;
    }

    /// Activation swaps the single active schedule, which moves the next
    /// run shown on the status panel.
    pub async fn activate_schedule(&mut self, id: i64) {
        let result = self.api.activate_schedule(id).await;
        self.finish(
            result,
            "error.unknown",
            &[PanelId::Schedules, PanelId::Status],
        )
        .await;
    }

    pub async fn delete_schedule(&mut self, id: i64) {
        let result = self.api.delete_schedule(id).await;
        self.finish(
            result,
            "error.unknown",
            &[PanelId::Schedules, PanelId::Status],
        )
        .await;
    }

    /// Ad-hoc preview against a chosen chat; rendered directly rather than
    /// through the preview panel so the stored snapshot stays untouched.
    pub async fn preview_for_chat(&mut self, chat_id: &str, chat_title: &str) {
        let request = PreviewRequest {
            chat_id: chat_id.to_string(),
            chat_title: chat_title.to_string(),
        };
        match self.api.post_preview(&request).await {
            Ok(post) => {
                let rendered = PreviewPanel.render(&post, &self.i18n);
                self.surface.show("preview", &rendered);
            }
            Err(AppError::Unauthorized) => {}
            Err(AppError::Api { message }) => {
                self.notifier.notify(&self.i18n, &message, NoticeKind::Error);
            }
            Err(err) => {
                log::warn!("Preview failed: {err}");
                let message = self.i18n.t("error.unknown").to_string();
                self.notifier.notify(&self.i18n, &message, NoticeKind::Error);
            }
        }
    }

    pub async fn logout(&mut self) {
        match self.api.logout().await {
            Ok(()) | Err(AppError::Unauthorized) => {}
            Err(AppError::Api { message }) => {
                let message = if message.is_empty() {
                    self.i18n.t("error.unknown").to_string()
                } else {
                    message
                };
                self.notifier.notify(&self.i18n, &message, NoticeKind::Error);
            }
            Err(err) => {
                log::warn!("Logout failed: {err}");
                let message = self.i18n.t("error.unknown").to_string();
                self.notifier.notify(&self.i18n, &message, NoticeKind::Error);
            }
        }
    }

    /// One warning notice for rejected input; nothing is sent.
    fn reject(&mut self, err: AppError) {
        let message = match &err {
            AppError::Validation(key) => self.i18n.t(key).to_string(),
            other => other.to_string(),
        };
        self.notifier
            .notify(&self.i18n, &message, NoticeKind::Warning);
    }

    /// Shared mutation epilogue: exactly one notice, and on success the
    /// affected panels are invalidated and refreshed.
    async fn finish(&mut self, result: Result<String>, fallback_key: &str, panels: &[PanelId]) {
        match result {
            Ok(message) => {
                self.notifier
                    .notify(&self.i18n, &message, NoticeKind::Success);
                for &id in panels {
                    self.invalidate(id);
                    self.refresh(id).await;
                }
            }
            Err(AppError::Unauthorized) => {}
            Err(AppError::Api { message }) => {
                let message = if message.is_empty() {
                    self.i18n.t(fallback_key).to_string()
                } else {
                    message
                };
                self.notifier.notify(&self.i18n, &message, NoticeKind::Error);
            }
            Err(err) => {
                log::warn!("Request failed: {err}");
                let message = self.i18n.t(fallback_key).to_string();
                self.notifier.notify(&self.i18n, &message, NoticeKind::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::RecordingSurface;

    /// One-shot HTTP stub: accepts a single connection and replies with a
    /// canned JSON response.
    async fn serve_once(status_line: &'static str, body: &'static str) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                use tokio::io::{AsyncReadExt, AsyncWriteExt};
                let mut buf = [0u8; 2048];
                let _ = sock.read(&mut buf).await;
                let resp = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = sock.write_all(resp.as_bytes()).await;
            }
        });
        addr
    }

    fn dashboard_against(addr: std::net::SocketAddr) -> Dashboard {
        let mut config = Config::default();
        config.server.base_url = format!("http://{addr}");
        Dashboard::new(config, Lang::En, Arc::new(RecordingSurface::new())).unwrap()
    }

    #[tokio::test]
    async fn test_logout_failure_surfaces_error_notice() {
        let addr = serve_once("400 Bad Request", r#"{"error": "Сессия не найдена"}"#).await;
        let mut dash = dashboard_against(addr);

        dash.logout().await;

        let notices = dash.notifier().active();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(notices[0].message, "Сессия не найдена");
    }

    #[tokio::test]
    async fn test_history_next_refused_on_short_page() {
        let body = r#"{"success": true,
                       "history": [{"published_at": "2026-08-01 10:00:00",
                                    "status": "success"}]}"#;
        let addr = serve_once("200 OK", body).await;
        let mut dash = dashboard_against(addr);

        // one record against a page size of 20: this is the final page
        dash.history_next_page().await;

        assert_eq!(dash.history.panel().page(), 1);
        let notices = dash.notifier().active();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Info);
        assert_eq!(notices[0].message, "This is the last page");
    }

    #[test]
    fn test_interval_empty_input() {
        let err = parse_interval("  ", IntervalUnit::Minutes).unwrap_err();
        assert!(matches!(err, AppError::Validation(key) if key == "toast.intervalNotSpecified"));
    }

    #[test]
    fn test_interval_non_numeric_and_non_positive() {
        for raw in ["abc", "0", "-5", "1.5"] {
            let err = parse_interval(raw, IntervalUnit::Minutes).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(key) if key == "toast.invalidInterval"),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_interval_hours_conversion_and_bounds() {
        assert_eq!(parse_interval("90", IntervalUnit::Minutes).unwrap(), 90);
        assert_eq!(parse_interval("2", IntervalUnit::Hours).unwrap(), 120);
        // 168 h is exactly the 7-day cap
        assert_eq!(parse_interval("168", IntervalUnit::Hours).unwrap(), 10080);
        let err = parse_interval("169", IntervalUnit::Hours).unwrap_err();
        assert!(matches!(err, AppError::Validation(key) if key == "toast.maxInterval"));
        let err = parse_interval("10081", IntervalUnit::Minutes).unwrap_err();
        assert!(matches!(err, AppError::Validation(key) if key == "toast.maxInterval"));
    }

    #[test]
    fn test_interval_unit_parsing() {
        assert_eq!(
            IntervalUnit::from_str("hours").unwrap(),
            IntervalUnit::Hours
        );
        assert_eq!(IntervalUnit::from_str("MIN").unwrap(), IntervalUnit::Minutes);
        assert!(IntervalUnit::from_str("days").is_err());
    }
}
