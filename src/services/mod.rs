// src/services/mod.rs

//! Backend access and user-facing notification services.

pub mod api;
pub mod notify;

pub use api::{ApiClient, ApiResponse};
pub use notify::{Notice, NoticeKind, Notifier};
