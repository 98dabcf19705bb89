// src/panels/mod.rs

//! Panel refresh machinery.
//!
//! Every dashboard section is a [`Panel`]: it fetches its data, projects
//! it into a comparable snapshot and renders it for a [`Surface`]. The
//! [`PanelController`] drives refreshes and skips the render when the
//! projection is unchanged since the previous fetch, so a background poll
//! that returns identical data costs nothing visible.

pub mod groups;
pub mod history;
pub mod preview;
pub mod progress;
pub mod schedules;
pub mod statistics;
pub mod status;
pub mod templates;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::locale::Localizer;
use crate::services::ApiClient;

pub use groups::GroupsPanel;
pub use history::HistoryPanel;
pub use preview::PreviewPanel;
pub use schedules::SchedulesPanel;
pub use statistics::StatisticsPanel;
pub use status::StatusPanel;
pub use templates::TemplatesPanel;

/// Render target for panel output.
///
/// Takes `&self` so one surface can be shared across controllers;
/// implementations use interior mutability where they need state.
pub trait Surface: Send + Sync {
    fn show(&self, panel: &str, content: &str);
}

/// Writes panel content to stdout.
#[derive(Debug, Default)]
pub struct TerminalSurface;

impl Surface for TerminalSurface {
    fn show(&self, panel: &str, content: &str) {
        println!("─── {panel} ───");
        println!("{content}");
    }
}

/// Captures rendered output for assertions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    rendered: Mutex<Vec<(String, String)>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<(String, String)> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn render_count(&self) -> usize {
        self.rendered.lock().unwrap().len()
    }
}

impl Surface for RecordingSurface {
    fn show(&self, panel: &str, content: &str) {
        self.rendered
            .lock()
            .unwrap()
            .push((panel.to_string(), content.to_string()));
    }
}

/// One refreshable dashboard section.
#[async_trait]
pub trait Panel: Send + Sync {
    /// Raw data as fetched from the backend.
    type Data: Send;
    /// Comparable projection of `Data`; equality decides whether a
    /// refresh re-renders.
    type Snapshot: PartialEq + Send;

    fn name(&self) -> &'static str;

    async fn fetch(&self, api: &ApiClient) -> Result<Self::Data>;

    fn project(&self, data: &Self::Data) -> Self::Snapshot;

    fn render(&self, data: &Self::Data, i18n: &Localizer) -> String;
}

/// Drives one panel's refresh cycle.
pub struct PanelController<P: Panel> {
    panel: P,
    in_flight: AtomicBool,
    loaded_once: AtomicBool,
    snapshot: Mutex<Option<P::Snapshot>>,
}

/// Clears the in-flight flag on every exit path of `refresh`.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<P: Panel> PanelController<P> {
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            in_flight: AtomicBool::new(false),
            loaded_once: AtomicBool::new(false),
            snapshot: Mutex::new(None),
        }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Forget the last projection; the next refresh renders
    /// unconditionally even if the data has not changed.
    pub fn invalidate(&self) {
        *self.snapshot.lock().unwrap() = None;
    }

    /// Fetch, project and render the panel.
    ///
    /// An overlapping call while a refresh is in flight is a no-op, not
    /// queued. Errors never propagate: an `Unauthorized` aborts silently
    /// (the fetch layer has already fired the redirect hook), a logical
    /// failure renders the server message and drops the snapshot, and a
    /// transport failure renders a generic localized placeholder while
    /// keeping the previous snapshot.
    pub async fn refresh(&self, api: &ApiClient, i18n: &Localizer, surface: &dyn Surface) {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            log::debug!("{}: refresh already in flight, skipped", self.panel.name());
            return;
        }
        let _guard = FlightGuard(&self.in_flight);

        if !self.loaded_once.swap(true, Ordering::SeqCst) {
            surface.show(self.panel.name(), i18n.t("loading"));
        }

        match self.panel.fetch(api).await {
            Ok(data) => {
                let snapshot = self.panel.project(&data);
                {
                    let mut held = self.snapshot.lock().unwrap();
                    if held.as_ref() == Some(&snapshot) {
                        log::debug!("{}: unchanged, render skipped", self.panel.name());
                        return;
                    }
                    *held = Some(snapshot);
                }
                surface.show(self.panel.name(), &self.panel.render(&data, i18n));
            }
            Err(AppError::Unauthorized) => {
                log::debug!("{}: unauthorized, aborting", self.panel.name());
            }
            Err(AppError::Api { message }) => {
                self.invalidate();
                surface.show(self.panel.name(), &i18n.rewrite_backend_message(&message));
            }
            Err(err) => {
                log::warn!("{}: refresh failed: {err}", self.panel.name());
                surface.show(self.panel.name(), i18n.t("error.loadFailed"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use super::*;
    use crate::config::ServerConfig;
    use crate::locale::Lang;

    fn offline_client() -> ApiClient {
        ApiClient::new(&ServerConfig::default()).unwrap()
    }

    /// Serves queued responses; never touches the client it is handed.
    struct ScriptedPanel {
        responses: Mutex<VecDeque<Result<u64>>>,
    }

    impl ScriptedPanel {
        fn new(responses: Vec<Result<u64>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl Panel for ScriptedPanel {
        type Data = u64;
        type Snapshot = u64;

        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn fetch(&self, _api: &ApiClient) -> Result<u64> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(0))
        }

        fn project(&self, data: &u64) -> u64 {
            *data
        }

        fn render(&self, data: &u64, _i18n: &Localizer) -> String {
            format!("value={data}")
        }
    }

    #[tokio::test]
    async fn test_identical_projection_skips_render() {
        let ctrl = PanelController::new(ScriptedPanel::new(vec![Ok(7), Ok(7)]));
        let api = offline_client();
        let i18n = Localizer::new(Lang::En);
        let surface = RecordingSurface::new();

        ctrl.refresh(&api, &i18n, &surface).await;
        ctrl.refresh(&api, &i18n, &surface).await;

        // loading placeholder + exactly one render
        let rendered = surface.rendered();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].1, "Loading...");
        assert_eq!(rendered[1].1, "value=7");
    }

    #[tokio::test]
    async fn test_invalidate_forces_render_of_identical_data() {
        let ctrl = PanelController::new(ScriptedPanel::new(vec![Ok(7), Ok(7)]));
        let api = offline_client();
        let i18n = Localizer::new(Lang::En);
        let surface = RecordingSurface::new();

        ctrl.refresh(&api, &i18n, &surface).await;
        ctrl.invalidate();
        ctrl.refresh(&api, &i18n, &surface).await;

        let rendered = surface.rendered();
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[1].1, "value=7");
        assert_eq!(rendered[2].1, "value=7");
    }

    #[tokio::test]
    async fn test_changed_projection_renders_again() {
        let ctrl = PanelController::new(ScriptedPanel::new(vec![Ok(1), Ok(2)]));
        let api = offline_client();
        let i18n = Localizer::new(Lang::En);
        let surface = RecordingSurface::new();

        ctrl.refresh(&api, &i18n, &surface).await;
        ctrl.refresh(&api, &i18n, &surface).await;

        let rendered = surface.rendered();
        assert_eq!(rendered.last().unwrap().1, "value=2");
        assert_eq!(rendered.len(), 3);
    }

    #[tokio::test]
    async fn test_unauthorized_aborts_silently() {
        let ctrl = PanelController::new(ScriptedPanel::new(vec![
            Err(AppError::Unauthorized),
            Ok(3),
        ]));
        let api = offline_client();
        let i18n = Localizer::new(Lang::En);
        let surface = RecordingSurface::new();

        ctrl.refresh(&api, &i18n, &surface).await;
        // only the first-load placeholder, no error output
        assert_eq!(surface.render_count(), 1);

        ctrl.refresh(&api, &i18n, &surface).await;
        assert_eq!(surface.rendered().last().unwrap().1, "value=3");
    }

    #[tokio::test]
    async fn test_logical_failure_renders_message_and_clears_snapshot() {
        let ctrl = PanelController::new(ScriptedPanel::new(vec![
            Ok(5),
            Err(AppError::api("Планировщик не инициализирован")),
            Ok(5),
        ]));
        let api = offline_client();
        let i18n = Localizer::new(Lang::En);
        let surface = RecordingSurface::new();

        ctrl.refresh(&api, &i18n, &surface).await;
        ctrl.refresh(&api, &i18n, &surface).await;
        ctrl.refresh(&api, &i18n, &surface).await;

        let rendered = surface.rendered();
        assert_eq!(rendered[2].1, "Scheduler not initialized");
        // snapshot was dropped, so the same value renders again
        assert_eq!(rendered[3].1, "value=5");
    }

    #[tokio::test]
    async fn test_transport_failure_renders_placeholder_and_keeps_snapshot() {
        let bad_json: serde_json::Error =
            serde_json::from_str::<u64>("not json").unwrap_err();
        let ctrl = PanelController::new(ScriptedPanel::new(vec![
            Ok(5),
            Err(AppError::Json(bad_json)),
            Ok(5),
        ]));
        let api = offline_client();
        let i18n = Localizer::new(Lang::En);
        let surface = RecordingSurface::new();

        ctrl.refresh(&api, &i18n, &surface).await;
        ctrl.refresh(&api, &i18n, &surface).await;
        ctrl.refresh(&api, &i18n, &surface).await;

        let rendered = surface.rendered();
        assert_eq!(rendered[2].1, "Failed to load data");
        // snapshot survived, identical data does not render again
        assert_eq!(rendered.len(), 3);
    }

    /// Blocks until released; used to hold a refresh in flight.
    struct GatedPanel {
        gate: Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl Panel for GatedPanel {
        type Data = u64;
        type Snapshot = u64;

        fn name(&self) -> &'static str {
            "gated"
        }

        async fn fetch(&self, _api: &ApiClient) -> Result<u64> {
            let gate = self.gate.lock().unwrap().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            Ok(1)
        }

        fn project(&self, data: &u64) -> u64 {
            *data
        }

        fn render(&self, data: &u64, _i18n: &Localizer) -> String {
            format!("value={data}")
        }
    }

    #[tokio::test]
    async fn test_overlapping_refresh_is_suppressed() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let ctrl = Arc::new(PanelController::new(GatedPanel {
            gate: Mutex::new(Some(rx)),
        }));
        let api = Arc::new(offline_client());
        let i18n = Localizer::new(Lang::En);
        let surface = Arc::new(RecordingSurface::new());

        let first = tokio::spawn({
            let ctrl = Arc::clone(&ctrl);
            let api = Arc::clone(&api);
            let surface = Arc::clone(&surface);
            async move { ctrl.refresh(&api, &i18n, surface.as_ref()).await }
        });
        tokio::task::yield_now().await;

        // second refresh while the first is parked on the gate
        ctrl.refresh(&api, &i18n, surface.as_ref()).await;
        tx.send(()).unwrap();
        first.await.unwrap();

        // placeholder + one render; the overlapping call produced nothing
        assert_eq!(surface.render_count(), 2);
    }
}
