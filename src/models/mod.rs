// src/models/mod.rs

//! View-models for the backend API payloads.
//!
//! All entities here are transient: they are reconstructed from each
//! fetch and compared structurally against the previously rendered
//! snapshot. The client holds no authoritative state of its own.

mod group;
mod history;
mod post;
mod schedule;
mod statistics;
mod status;
mod template;

pub use group::{Group, GroupsPayload};
pub use history::{HistoryPage, HistoryQuery, HistoryRecord};
pub use post::{PostInfo, PreviewRequest};
pub use schedule::{Schedule, ScheduleSpec};
pub use statistics::{DailyStat, HourlyStat, Statistics, TopGroup};
pub use status::{DashboardStatus, PublicationError, PublicationStatus};
pub use template::Template;
