// src/models/schedule.rs

//! Publication schedules.
//!
//! `schedule_data` is a tagged union keyed by `schedule_type`; at most one
//! schedule is active at a time (the backend enforces this, the client
//! asks for confirmation before activating a replacement).

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::locale::Localizer;

/// A schedule as returned by `/api/schedules`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub id: i64,

    #[serde(flatten)]
    pub spec: ScheduleSpec,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub created_at: String,
}

/// Variant payload of a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "schedule_type", content = "schedule_data", rename_all = "lowercase")]
pub enum ScheduleSpec {
    /// Repeat every `minutes` minutes
    Interval { minutes: u32 },

    /// Once a day at a fixed time
    Time { hour: u8, minute: u8 },

    /// Fixed time on selected weekdays (Monday-based 0-6)
    Days { days: Vec<u8>, hour: u8, minute: u8 },

    /// Repeating interval inside a daily window
    Hours {
        start_hour: u8,
        end_hour: u8,
        interval_minutes: u32,
    },
}

impl ScheduleSpec {
    /// Client-side validation; rejected specs are never sent to the
    /// server. Errors carry translation keys.
    pub fn validate(&self) -> Result<()> {
        match self {
            ScheduleSpec::Interval { minutes } => {
                if *minutes < 1 {
                    return Err(AppError::validation("schedule.errors.invalidInterval"));
                }
            }
            ScheduleSpec::Time { hour, minute } => {
                if *hour > 23 || *minute > 59 {
                    return Err(AppError::validation("schedule.errors.invalidTime"));
                }
            }
            ScheduleSpec::Days { days, hour, minute } => {
                if days.is_empty() {
                    return Err(AppError::validation("schedule.errors.noDays"));
                }
                if days.iter().any(|d| *d > 6) {
                    return Err(AppError::validation("schedule.errors.noDays"));
                }
                if *hour > 23 || *minute > 59 {
                    return Err(AppError::validation("schedule.errors.invalidTime"));
                }
            }
            ScheduleSpec::Hours {
                start_hour,
                end_hour,
                interval_minutes,
            } => {
                if *start_hour > 23 || *end_hour > 23 || start_hour >= end_hour {
                    return Err(AppError::validation("schedule.errors.invalidHours"));
                }
                if *interval_minutes < 1 || *interval_minutes > 1440 {
                    return Err(AppError::validation("schedule.errors.invalidInterval"));
                }
            }
        }
        Ok(())
    }

    /// Localized type name for the schedule table.
    pub fn type_label(&self, i18n: &Localizer) -> String {
        let key = match self {
            ScheduleSpec::Interval { .. } => "schedule.types.interval",
            ScheduleSpec::Time { .. } => "schedule.types.time",
            ScheduleSpec::Days { .. } => "schedule.types.days",
            ScheduleSpec::Hours { .. } => "schedule.types.hours",
        };
        i18n.t(key).to_string()
    }

    /// Localized detail column, e.g. `"Mon, Fri 09:30"` or
    /// `"09:00 - 18:00 (60 minutes)"`.
    pub fn describe(&self, i18n: &Localizer) -> String {
        match self {
            ScheduleSpec::Interval { minutes } => i18n.format_interval(*minutes),
            ScheduleSpec::Time { hour, minute } => format!("{hour:02}:{minute:02}"),
            ScheduleSpec::Days { days, hour, minute } => {
                let names: Vec<&str> = days.iter().map(|d| i18n.day_name(*d)).collect();
                format!("{} {hour:02}:{minute:02}", names.join(", "))
            }
            ScheduleSpec::Hours {
                start_hour,
                end_hour,
                interval_minutes,
            } => format!(
                "{start_hour:02}:00 - {end_hour:02}:00 ({interval_minutes} {})",
                i18n.t("schedule.minutes")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Lang;

    #[test]
    fn test_interval_validation() {
        assert!(ScheduleSpec::Interval { minutes: 1 }.validate().is_ok());
        assert!(ScheduleSpec::Interval { minutes: 0 }.validate().is_err());
    }

    #[test]
    fn test_days_requires_nonempty_set() {
        let spec = ScheduleSpec::Days {
            days: vec![],
            hour: 12,
            minute: 0,
        };
        assert!(spec.validate().is_err());

        let spec = ScheduleSpec::Days {
            days: vec![0, 4],
            hour: 12,
            minute: 0,
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_days_rejects_out_of_range() {
        let spec = ScheduleSpec::Days {
            days: vec![7],
            hour: 12,
            minute: 0,
        };
        assert!(spec.validate().is_err());

        let spec = ScheduleSpec::Days {
            days: vec![1],
            hour: 24,
            minute: 0,
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_hours_window_ordering() {
        let bad = ScheduleSpec::Hours {
            start_hour: 18,
            end_hour: 9,
            interval_minutes: 60,
        };
        assert!(bad.validate().is_err());

        let equal = ScheduleSpec::Hours {
            start_hour: 9,
            end_hour: 9,
            interval_minutes: 60,
        };
        assert!(equal.validate().is_err());

        let full_day = ScheduleSpec::Hours {
            start_hour: 0,
            end_hour: 23,
            interval_minutes: 60,
        };
        assert!(full_day.validate().is_ok());
    }

    #[test]
    fn test_hours_interval_bounds() {
        let too_long = ScheduleSpec::Hours {
            start_hour: 0,
            end_hour: 23,
            interval_minutes: 1441,
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_tagged_union_deserialization() {
        let json = r#"{
            "id": 3,
            "schedule_type": "hours",
            "schedule_data": {"start_hour": 9, "end_hour": 18, "interval_minutes": 60},
            "is_active": true,
            "created_at": "2026-08-01 10:00:00"
        }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert!(schedule.is_active);
        assert!(matches!(
            schedule.spec,
            ScheduleSpec::Hours {
                start_hour: 9,
                end_hour: 18,
                interval_minutes: 60
            }
        ));
    }

    #[test]
    fn test_describe_days() {
        let i18n = Localizer::new(Lang::En);
        let spec = ScheduleSpec::Days {
            days: vec![0, 4],
            hour: 9,
            minute: 5,
        };
        assert_eq!(spec.describe(&i18n), "Mon, Fri 09:05");
    }

    #[test]
    fn test_describe_hours_window() {
        let i18n = Localizer::new(Lang::En);
        let spec = ScheduleSpec::Hours {
            start_hour: 9,
            end_hour: 18,
            interval_minutes: 60,
        };
        assert_eq!(spec.describe(&i18n), "09:00 - 18:00 (60 minutes)");
    }
}
