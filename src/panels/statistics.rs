// src/panels/statistics.rs

//! Statistics panel: totals, activity series and top groups over an
//! optional date range.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Localizer;
use crate::models::Statistics;
use crate::panels::Panel;
use crate::services::ApiClient;

/// Statistics over an optional date range; the range lives inside the
/// panel so a background refresh keeps the chosen period.
#[derive(Default)]
pub struct StatisticsPanel {
    range: Mutex<(Option<String>, Option<String>)>,
}

impl StatisticsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow or widen the date range (YYYY-MM-DD on each end).
    pub fn set_range(&self, start_date: Option<String>, end_date: Option<String>) {
        *self.range.lock().unwrap() = (start_date, end_date);
    }
}

#[async_trait]
impl Panel for StatisticsPanel {
    type Data = Statistics;
    type Snapshot = Statistics;

    fn name(&self) -> &'static str {
        "statistics"
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Statistics> {
        let (start, end) = self.range.lock().unwrap().clone();
        api.statistics(start.as_deref(), end.as_deref()).await
    }

    fn project(&self, data: &Statistics) -> Statistics {
        data.clone()
    }

    fn render(&self, data: &Statistics, i18n: &Localizer) -> String {
        let mut out = format!(
            "{}: {}\n{}: {}\n{}: {}\n{}: {:.1}%",
            i18n.t("statistics.total"),
            data.total,
            i18n.t("statistics.successful"),
            data.successful,
            i18n.t("statistics.failed"),
            data.failed,
            i18n.t("statistics.successRate"),
            data.success_rate,
        );

        out.push_str(&format!("\n{}:", i18n.t("statistics.dailyActivity")));
        let daily = data.daily_series();
        if daily.is_empty() {
            out.push_str(&format!(" {}", i18n.t("statistics.noData")));
        } else {
            for day in daily {
                out.push_str(&format!(
                    "\n  {}: +{} / -{}",
                    day.date, day.successful, day.failed
                ));
            }
        }

        out.push_str(&format!("\n{}:", i18n.t("statistics.hourlyActivity")));
        let hourly = data.hourly_series();
        if hourly.iter().all(|&count| count == 0) {
            out.push_str(&format!(" {}", i18n.t("statistics.noData")));
        } else {
            for (hour, count) in hourly.iter().enumerate().filter(|(_, &c)| c > 0) {
                out.push_str(&format!("\n  {hour:02}:00 {count}"));
            }
        }

        out.push_str(&format!("\n{}:", i18n.t("statistics.topGroups")));
        let top = data.top_groups_capped();
        if top.is_empty() {
            out.push_str(&format!(" {}", i18n.t("statistics.noData")));
        } else {
            for group in top {
                out.push_str(&format!("\n  {}: {}", group.label(), group.count));
            }
        }
        out
    }
}
