// src/panels/progress.rs

//! Publication progress presentation.
//!
//! The backend reports progress as free-text step phrases plus counters.
//! This module derives a fresh view from every status payload and adapts
//! the known phrases to the active language; anything unrecognized passes
//! through verbatim.

use crate::locale::{fill, Localizer};
use crate::models::{PublicationError, PublicationStatus};

/// Publication state as shown on the status panel.
///
/// Always rebuilt from the latest fetch; no publishing state is carried
/// over between polls.
#[derive(Debug, Clone, PartialEq)]
pub enum PublicationView {
    /// The status payload carried no publication block at all.
    Absent,
    /// A block is present but `is_publishing` is false.
    Idle,
    Running(RunningDetail),
}

/// Details of an in-flight publication run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningDetail {
    /// Localized step label.
    pub step: String,
    /// Clamped to `[0, 100]`.
    pub percent: f64,
    pub completed: u64,
    pub total: u64,
    pub start_time: String,
    pub last_update: String,
    pub errors: Vec<PublicationError>,
}

impl PublicationView {
    pub fn from_status(status: Option<&PublicationStatus>, i18n: &Localizer) -> Self {
        let Some(status) = status else {
            return PublicationView::Absent;
        };
        if !status.is_publishing {
            return PublicationView::Idle;
        }
        let raw_step = status.current_step.as_deref().unwrap_or("-");
        PublicationView::Running(RunningDetail {
            step: adapt_step(raw_step, i18n),
            percent: status.progress_percent.clamp(0.0, 100.0),
            completed: status.completed_groups,
            total: status.total_groups,
            start_time: placeholder(status.start_time_str.as_deref()),
            last_update: placeholder(status.last_update_str.as_deref()),
            errors: status.errors.clone(),
        })
    }
}

impl RunningDetail {
    /// `"42.5% (3/7)"`; the percentage is always printed with one decimal.
    pub fn summary(&self) -> String {
        format!("{:.1}% ({}/{})", self.percent, self.completed, self.total)
    }

    /// Success tone only at exactly 100%.
    pub fn is_complete(&self) -> bool {
        self.percent == 100.0
    }

    pub fn render(&self, i18n: &Localizer) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {}\n",
            i18n.t("publication.currentStep"),
            self.step
        ));
        out.push_str(&format!(
            "{} {}\n",
            i18n.t("publication.progress"),
            self.summary()
        ));
        out.push_str(&format!(
            "{} {}\n",
            i18n.t("publication.startTime"),
            self.start_time
        ));
        out.push_str(&format!(
            "{} {}",
            i18n.t("publication.lastUpdate"),
            self.last_update
        ));
        if !self.errors.is_empty() {
            out.push('\n');
            out.push_str(i18n.t("publication.errors"));
            for err in &self.errors {
                let group = err.group.as_deref().unwrap_or(i18n.t("error.unknownGroup"));
                let error = err.error.as_deref().unwrap_or(i18n.t("error.unknown"));
                out.push_str(&format!("\n  {group}: {error}"));
                if let Some(time) = &err.time {
                    out.push_str(&format!(" ({time})"));
                }
            }
        }
        out
    }
}

/// Map a backend step phrase to its localized label.
///
/// Matches the fixed set of phrases the backend emits, in both the
/// Russian and English forms it has been seen to produce. Counted phrases
/// carry their number over via digit extraction. Unknown phrases are
/// returned unchanged.
pub fn adapt_step(raw: &str, i18n: &Localizer) -> String {
    if raw == "Завершено" || raw == "Completed" {
        return i18n.t("publication.completed").to_string();
    }
    if raw == "Прервано" || raw == "Cancelled" {
        return i18n.t("publication.cancelled").to_string();
    }
    if raw == "Публикация завершена успешно!" || raw.contains("completed successfully") {
        return i18n.t("publication.completedSuccess").to_string();
    }
    if raw.contains("завершена с ошибками") || raw.contains("completed with errors") {
        return i18n.t("publication.completedWithErrors").to_string();
    }
    if raw.contains("Критическая ошибка") || raw.contains("Critical error") {
        return i18n.t("publication.criticalError").to_string();
    }
    if raw == "Инициализация" || raw == "Initialization" {
        return i18n.t("publication.initialization").to_string();
    }
    if raw.contains("Получение списка групп") || raw.contains("Getting groups") {
        return i18n.t("publication.gettingGroups").to_string();
    }
    if raw.contains("Публикация в") && raw.contains("групп") {
        if let Some(n) = first_number(raw) {
            return fill(i18n.t("publication.publishing"), &[("total", &n)]);
        }
    }
    if raw.contains("Ожидание") || raw.contains("Waiting") {
        if let Some(n) = first_number(raw) {
            return fill(i18n.t("publication.waiting"), &[("seconds", &n)]);
        }
    }
    raw.to_string()
}

fn first_number(text: &str) -> Option<String> {
    static DIGITS: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let digits = DIGITS.get_or_init(|| regex::Regex::new(r"\d+").expect("static regex"));
    digits.find(text).map(|m| m.as_str().to_string())
}

fn placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Lang;

    fn en() -> Localizer {
        Localizer::new(Lang::En)
    }

    fn running(percent: f64, completed: u64, total: u64) -> PublicationStatus {
        PublicationStatus {
            is_publishing: true,
            current_step: Some("Инициализация".into()),
            progress_percent: percent,
            completed_groups: completed,
            total_groups: total,
            ..PublicationStatus::default()
        }
    }

    #[test]
    fn test_absent_and_idle_views() {
        assert_eq!(
            PublicationView::from_status(None, &en()),
            PublicationView::Absent
        );
        let idle = PublicationStatus::default();
        assert_eq!(
            PublicationView::from_status(Some(&idle), &en()),
            PublicationView::Idle
        );
    }

    #[test]
    fn test_summary_format() {
        let view = PublicationView::from_status(Some(&running(42.512, 3, 7)), &en());
        let PublicationView::Running(detail) = view else {
            panic!("expected running view");
        };
        assert_eq!(detail.summary(), "42.5% (3/7)");
        assert!(!detail.is_complete());
    }

    #[test]
    fn test_percent_clamped() {
        let over = PublicationView::from_status(Some(&running(150.0, 7, 7)), &en());
        let PublicationView::Running(detail) = over else {
            panic!("expected running view");
        };
        assert_eq!(detail.percent, 100.0);
        assert!(detail.is_complete());

        let under = PublicationView::from_status(Some(&running(-3.0, 0, 7)), &en());
        let PublicationView::Running(detail) = under else {
            panic!("expected running view");
        };
        assert_eq!(detail.percent, 0.0);
    }

    #[test]
    fn test_step_exact_phrases() {
        let i18n = en();
        assert_eq!(adapt_step("Завершено", &i18n), "Completed");
        assert_eq!(adapt_step("Прервано", &i18n), "Cancelled");
        assert_eq!(adapt_step("Инициализация", &i18n), "Initialization");
        assert_eq!(
            adapt_step("Публикация завершена успешно!", &i18n),
            "Publication completed successfully!"
        );
        assert_eq!(
            adapt_step("Получение списка групп...", &i18n),
            "Getting groups list..."
        );
    }

    #[test]
    fn test_step_counted_phrases() {
        let i18n = en();
        assert_eq!(
            adapt_step("Публикация в 3 групп", &i18n),
            "Publishing to 3 groups"
        );
        assert_eq!(
            adapt_step("Ожидание 49 секунд...", &i18n),
            "Waiting 49 seconds..."
        );
    }

    #[test]
    fn test_step_russian_ui_keeps_russian() {
        let i18n = Localizer::new(Lang::Ru);
        assert_eq!(
            adapt_step("Публикация в 12 групп", &i18n),
            "Публикация в 12 групп"
        );
        assert_eq!(adapt_step("Завершено", &i18n), "Завершено");
    }

    #[test]
    fn test_step_unknown_passthrough() {
        assert_eq!(adapt_step("что-то новое", &en()), "что-то новое");
    }

    #[test]
    fn test_missing_timestamps_placeholder() {
        let view = PublicationView::from_status(Some(&running(10.0, 1, 7)), &en());
        let PublicationView::Running(detail) = view else {
            panic!("expected running view");
        };
        assert_eq!(detail.start_time, "-");
        assert_eq!(detail.last_update, "-");
    }

    #[test]
    fn test_render_hides_empty_error_list() {
        let view = PublicationView::from_status(Some(&running(10.0, 1, 7)), &en());
        let PublicationView::Running(detail) = view else {
            panic!("expected running view");
        };
        assert!(!detail.render(&en()).contains("Errors:"));

        let mut status = running(10.0, 1, 7);
        status.errors.push(PublicationError {
            group: Some("test_group".into()),
            error: Some("flood wait".into()),
            time: None,
        });
        let PublicationView::Running(detail) =
            PublicationView::from_status(Some(&status), &en())
        else {
            panic!("expected running view");
        };
        let rendered = detail.render(&en());
        assert!(rendered.contains("Errors:"));
        assert!(rendered.contains("test_group: flood wait"));
    }
}
