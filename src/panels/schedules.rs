// src/panels/schedules.rs

//! Schedules panel: the list of configured publication schedules.

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Localizer;
use crate::models::Schedule;
use crate::panels::Panel;
use crate::services::ApiClient;

pub struct SchedulesPanel;

#[async_trait]
impl Panel for SchedulesPanel {
    type Data = Vec<Schedule>;
    type Snapshot = Vec<Schedule>;

    fn name(&self) -> &'static str {
        "schedules"
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Vec<Schedule>> {
        api.schedules().await
    }

    fn project(&self, data: &Vec<Schedule>) -> Vec<Schedule> {
        data.clone()
    }

    fn render(&self, data: &Vec<Schedule>, i18n: &Localizer) -> String {
        if data.is_empty() {
            return i18n.t("schedule.empty").to_string();
        }
        let mut lines = vec![format!(
            "{} | {} | {} | {}",
            i18n.t("schedule.table.type"),
            i18n.t("schedule.table.details"),
            i18n.t("schedule.table.status"),
            i18n.t("schedule.table.created"),
        )];
        for schedule in data {
            let status = if schedule.is_active {
                i18n.t("schedule.active")
            } else {
                i18n.t("schedule.inactive")
            };
            lines.push(format!(
                "{} | {} | {status} | {}",
                schedule.spec.type_label(i18n),
                schedule.spec.describe(i18n),
                schedule.created_at,
            ));
        }
        lines.join("\n")
    }
}
