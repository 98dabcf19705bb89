// src/models/statistics.rs

//! Aggregate publication statistics.
//!
//! The charting library is an external rendering target; this module only
//! shapes the series the way the charts consume them (24 hourly slots,
//! oldest-first daily points, top-10 groups).

use serde::{Deserialize, Serialize};

/// Payload of `/api/publication_statistics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Statistics {
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub successful: u64,

    #[serde(default)]
    pub failed: u64,

    /// Percentage, backend-computed
    #[serde(default)]
    pub success_rate: f64,

    #[serde(default)]
    pub daily_stats: Vec<DailyStat>,

    #[serde(default)]
    pub hourly_stats: Vec<HourlyStat>,

    #[serde(default)]
    pub top_groups: Vec<TopGroup>,
}

/// One day of activity, newest first as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyStat {
    pub date: String,

    #[serde(default)]
    pub successful: u64,

    #[serde(default)]
    pub failed: u64,
}

/// Publications within one hour of day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyStat {
    pub hour: u8,

    #[serde(default)]
    pub count: u64,
}

/// Most-published-to group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopGroup {
    #[serde(default)]
    pub chat_id: Option<serde_json::Value>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub count: u64,
}

impl TopGroup {
    pub fn label(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|s| !s.is_empty()) {
            return title.to_string();
        }
        match &self.chat_id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "Unknown".to_string(),
        }
    }
}

impl Statistics {
    /// Daily points reordered oldest-first for the activity series.
    pub fn daily_series(&self) -> Vec<&DailyStat> {
        self.daily_stats.iter().rev().collect()
    }

    /// Per-hour counts expanded to all 24 slots; missing hours are zero,
    /// out-of-range hours are dropped.
    pub fn hourly_series(&self) -> [u64; 24] {
        let mut slots = [0u64; 24];
        for stat in &self.hourly_stats {
            if let Some(slot) = slots.get_mut(stat.hour as usize) {
                *slot = stat.count;
            }
        }
        slots
    }

    /// Top groups truncated to ten entries.
    pub fn top_groups_capped(&self) -> &[TopGroup] {
        let end = self.top_groups.len().min(10);
        &self.top_groups[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_series_fills_gaps() {
        let stats = Statistics {
            hourly_stats: vec![
                HourlyStat { hour: 0, count: 3 },
                HourlyStat { hour: 23, count: 1 },
            ],
            ..Statistics::default()
        };
        let series = stats.hourly_series();
        assert_eq!(series[0], 3);
        assert_eq!(series[12], 0);
        assert_eq!(series[23], 1);
    }

    #[test]
    fn test_hourly_series_drops_invalid_hour() {
        let stats = Statistics {
            hourly_stats: vec![HourlyStat { hour: 24, count: 9 }],
            ..Statistics::default()
        };
        assert!(stats.hourly_series().iter().all(|c| *c == 0));
    }

    #[test]
    fn test_daily_series_oldest_first() {
        let stats = Statistics {
            daily_stats: vec![
                DailyStat {
                    date: "2026-08-03".into(),
                    successful: 1,
                    failed: 0,
                },
                DailyStat {
                    date: "2026-08-02".into(),
                    successful: 2,
                    failed: 0,
                },
            ],
            ..Statistics::default()
        };
        let series = stats.daily_series();
        assert_eq!(series[0].date, "2026-08-02");
        assert_eq!(series[1].date, "2026-08-03");
    }

    #[test]
    fn test_top_groups_capped_at_ten() {
        let stats = Statistics {
            top_groups: (0..15)
                .map(|i| TopGroup {
                    chat_id: Some(serde_json::json!(i)),
                    title: None,
                    count: i,
                })
                .collect(),
            ..Statistics::default()
        };
        assert_eq!(stats.top_groups_capped().len(), 10);
    }
}
