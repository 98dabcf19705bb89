// src/models/status.rs

//! Aggregate dashboard status and the publication progress sub-state.

use serde::{Deserialize, Serialize};

/// Payload of `/api/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardStatus {
    #[serde(default)]
    pub telegram_connected: bool,

    #[serde(default)]
    pub groups_count: u64,

    #[serde(default)]
    pub interval_minutes: Option<u32>,

    /// Backend-localized scheduler state; `"Запущен"` means running
    #[serde(default)]
    pub scheduler_status: String,

    #[serde(default)]
    pub next_run: Option<String>,

    #[serde(default)]
    pub publication_status: Option<PublicationStatus>,
}

impl DashboardStatus {
    pub fn scheduler_running(&self) -> bool {
        self.scheduler_status == "Запущен" || self.scheduler_status == "Running"
    }
}

/// Progress of an asynchronous publication job. Always derived fresh from
/// the latest status fetch; the client keeps no memory of previous
/// publishing state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PublicationStatus {
    #[serde(default)]
    pub is_publishing: bool,

    #[serde(default)]
    pub current_step: Option<String>,

    #[serde(default)]
    pub progress_percent: f64,

    #[serde(default)]
    pub completed_groups: u64,

    #[serde(default)]
    pub total_groups: u64,

    #[serde(default)]
    pub start_time_str: Option<String>,

    #[serde(default)]
    pub last_update_str: Option<String>,

    #[serde(default)]
    pub errors: Vec<PublicationError>,
}

/// Per-group failure during a publication run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicationError {
    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub time: Option<String>,
}
