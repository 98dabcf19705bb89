// src/panels/status.rs

//! Main status panel: connection, counters, scheduler and the embedded
//! publication progress block.

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Localizer;
use crate::models::DashboardStatus;
use crate::panels::progress::PublicationView;
use crate::panels::Panel;
use crate::services::ApiClient;

pub struct StatusPanel;

#[async_trait]
impl Panel for StatusPanel {
    type Data = DashboardStatus;
    type Snapshot = DashboardStatus;

    fn name(&self) -> &'static str {
        "status"
    }

    async fn fetch(&self, api: &ApiClient) -> Result<DashboardStatus> {
        api.status().await
    }

    fn project(&self, data: &DashboardStatus) -> DashboardStatus {
        data.clone()
    }

    fn render(&self, data: &DashboardStatus, i18n: &Localizer) -> String {
        let connection = if data.telegram_connected {
            i18n.t("connection.connected")
        } else {
            i18n.t("connection.disconnected")
        };

        let interval = match data.interval_minutes {
            Some(minutes) => i18n.format_interval(minutes),
            None => "-".to_string(),
        };

        let scheduler = if data.scheduler_running() {
            i18n.t("status.running")
        } else {
            i18n.t("status.stopped")
        };

        let next_run = data.next_run.as_deref().unwrap_or(i18n.t("status.unknown"));

        let mut out = format!(
            "{connection}\n{}: {}\n{}: {interval}\n{}: {scheduler}\n{}: {next_run}",
            i18n.t("status.groups"),
            data.groups_count,
            i18n.t("status.interval"),
            i18n.t("status.scheduler"),
            i18n.t("status.nextPublication"),
        );

        match PublicationView::from_status(data.publication_status.as_ref(), i18n) {
            PublicationView::Absent | PublicationView::Idle => {
                out.push_str(&format!(
                    "\n{}: {}",
                    i18n.t("status.publication"),
                    i18n.t("status.notActive")
                ));
            }
            PublicationView::Running(detail) => {
                out.push_str(&format!(
                    "\n{}: {}\n{}\n{}",
                    i18n.t("status.publication"),
                    i18n.t("status.publishing"),
                    i18n.t("publication.details"),
                    detail.render(i18n)
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Lang;
    use crate::models::PublicationStatus;

    #[test]
    fn test_render_idle_status() {
        let panel = StatusPanel;
        let i18n = Localizer::new(Lang::En);
        let data = DashboardStatus {
            telegram_connected: true,
            groups_count: 4,
            interval_minutes: Some(90),
            scheduler_status: "Запущен".into(),
            next_run: Some("2026-08-27 14:00".into()),
            publication_status: None,
        };
        let out = panel.render(&data, &i18n);
        assert!(out.contains("Connected"));
        assert!(out.contains("Groups: 4"));
        assert!(out.contains("Interval: 1h 30m"));
        assert!(out.contains("Scheduler: Running"));
        assert!(out.contains("Publication Status: Not Active"));
    }

    #[test]
    fn test_render_running_publication() {
        let panel = StatusPanel;
        let i18n = Localizer::new(Lang::En);
        let data = DashboardStatus {
            publication_status: Some(PublicationStatus {
                is_publishing: true,
                current_step: Some("Ожидание 15 секунд...".into()),
                progress_percent: 50.0,
                completed_groups: 2,
                total_groups: 4,
                ..PublicationStatus::default()
            }),
            ..DashboardStatus::default()
        };
        let out = panel.render(&data, &i18n);
        assert!(out.contains("Publication Status: Publishing"));
        assert!(out.contains("Waiting 15 seconds..."));
        assert!(out.contains("50.0% (2/4)"));
    }

    #[test]
    fn test_missing_interval_shows_placeholder() {
        let panel = StatusPanel;
        let i18n = Localizer::new(Lang::En);
        let out = panel.render(&DashboardStatus::default(), &i18n);
        assert!(out.contains("Interval: -"));
    }
}
