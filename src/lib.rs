// src/lib.rs

//! Terminal dashboard client for a Telegram posting bot.
//!
//! Talks to the bot's web backend over its JSON API and mirrors the
//! browser dashboard: polled panels that only re-render when their data
//! actually changes, localized output, and the bot's mutation endpoints
//! (groups, schedules, templates, scheduler controls) with client-side
//! validation.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod locale;
pub mod models;
pub mod panels;
pub mod services;
pub mod state;

pub use config::Config;
pub use dashboard::{Dashboard, IntervalUnit, PanelId};
pub use error::{AppError, Result};
pub use locale::{Lang, Localizer};
