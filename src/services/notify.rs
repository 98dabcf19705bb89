// src/services/notify.rs

//! Transient, auto-dismissing notifications.
//!
//! Notices stack and each expires independently after a fixed delay, the
//! same five seconds the web toasts used. Messages are passed through the
//! backend-message rewrite before being stored.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::locale::Localizer;

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    /// Client-side validation notices; never the result of a server error.
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// One queued notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    fn expired_at(&self, now: DateTime<Utc>) -> bool {
        (now - self.created_at).to_std().unwrap_or_default() >= NOTICE_TTL
    }
}

/// Queue of active notices.
#[derive(Debug, Default)]
pub struct Notifier {
    notices: Vec<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice; the message is rewritten through the localized
    /// backend-message table first.
    pub fn notify(&mut self, i18n: &Localizer, message: &str, kind: NoticeKind) {
        let message = i18n.rewrite_backend_message(message);
        log::info!("[{}] {}", kind.as_str(), message);
        self.notices.push(Notice {
            message,
            kind,
            created_at: Utc::now(),
        });
    }

    /// Drop expired notices and return the still-visible ones.
    pub fn active(&mut self) -> &[Notice] {
        self.prune(Utc::now());
        &self.notices
    }

    /// Explicit dismissal of a single notice.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|n| !n.expired_at(now));
    }

    #[cfg(test)]
    fn backdate_all(&mut self, by: chrono::TimeDelta) {
        for notice in &mut self.notices {
            notice.created_at -= by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{Lang, Localizer};

    #[test]
    fn test_notices_stack() {
        let i18n = Localizer::new(Lang::En);
        let mut notifier = Notifier::new();
        notifier.notify(&i18n, "one", NoticeKind::Info);
        notifier.notify(&i18n, "two", NoticeKind::Error);
        assert_eq!(notifier.active().len(), 2);
    }

    #[test]
    fn test_notice_expires_after_ttl() {
        let i18n = Localizer::new(Lang::En);
        let mut notifier = Notifier::new();
        notifier.notify(&i18n, "soon gone", NoticeKind::Success);
        notifier.backdate_all(chrono::TimeDelta::seconds(6));
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_explicit_dismiss() {
        let i18n = Localizer::new(Lang::En);
        let mut notifier = Notifier::new();
        notifier.notify(&i18n, "a", NoticeKind::Info);
        notifier.notify(&i18n, "b", NoticeKind::Info);
        notifier.dismiss(0);
        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "b");
    }

    #[test]
    fn test_backend_message_rewrite_applied() {
        let i18n = Localizer::new(Lang::En);
        let mut notifier = Notifier::new();
        notifier.notify(&i18n, "Группа добавлена", NoticeKind::Success);
        assert_eq!(notifier.active()[0].message, "Group added");
    }
}
