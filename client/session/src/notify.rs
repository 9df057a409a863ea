//! Connectivity banner and the bounded notification center.

use std::collections::VecDeque;

use tracing::info;

use simdash_core::types::{HealthSnapshot, Notification, NotifyLevel};

use crate::state::Session;
use crate::view::ViewState;

/// Default number of notifications kept for display.
const DEFAULT_CAPACITY: usize = 8;

/// The fixed connectivity banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Banner {
    Online,
    #[default]
    Demo,
}

impl Banner {
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Backend Online",
            Self::Demo => "Demo Mode",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Online => "🟢",
            Self::Demo => "🟡",
        }
    }
}

/// Bounded list of user-facing notifications, newest last.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: VecDeque<Notification>,
}

impl NotificationCenter {
    pub fn push(&mut self, level: NotifyLevel, text: impl Into<String>) {
        let notification = Notification::new(level, text);
        info!(level = ?notification.level, text = %notification.text, "Notification");
        if self.items.len() >= DEFAULT_CAPACITY {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NotifyLevel::Error, text);
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Apply a health probe outcome to the session and view. `None` means the
/// probe itself failed (transport error).
pub fn apply_health(session: &mut Session, view: &mut ViewState, health: Option<&HealthSnapshot>) {
    match health {
        Some(snapshot) if snapshot.is_healthy() => {
            session.backend_connected = true;
            view.banner = Banner::Online;
            view.notifications.success(format!(
                "Backend connected - {} templates, {} running",
                snapshot.templates_count.unwrap_or(0),
                snapshot.running_experiments.unwrap_or(0),
            ));
        }
        Some(_) => {
            session.backend_connected = false;
            view.banner = Banner::Demo;
            view.notifications.warning("Backend offline - using demo mode");
        }
        None => {
            session.backend_connected = false;
            view.banner = Banner::Demo;
            view.notifications.warning("Backend unavailable - using demo mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_probe_sets_banner_and_notification() {
        let mut session = Session::new();
        let mut view = ViewState::new();
        let health = HealthSnapshot {
            status: "healthy".into(),
            templates_count: Some(3),
            ..Default::default()
        };

        apply_health(&mut session, &mut view, Some(&health));

        assert!(session.backend_connected);
        assert_eq!(view.banner.label(), "Backend Online");
        let latest = view.notifications.latest().unwrap();
        assert_eq!(latest.level, NotifyLevel::Success);
        assert!(latest.text.contains("3 templates"));
    }

    #[test]
    fn test_unhealthy_probe_falls_back_to_demo() {
        let mut session = Session::new();
        session.backend_connected = true;
        let mut view = ViewState::new();
        let health = HealthSnapshot { status: "unhealthy".into(), ..Default::default() };

        apply_health(&mut session, &mut view, Some(&health));

        assert!(!session.backend_connected);
        assert_eq!(view.banner, Banner::Demo);
    }

    #[test]
    fn test_failed_probe_warns() {
        let mut session = Session::new();
        let mut view = ViewState::new();
        apply_health(&mut session, &mut view, None);
        assert_eq!(view.banner.label(), "Demo Mode");
        assert_eq!(view.notifications.latest().unwrap().level, NotifyLevel::Warning);
    }

    #[test]
    fn test_notification_center_is_bounded() {
        let mut center = NotificationCenter::default();
        for i in 0..20 {
            center.info(format!("note {}", i));
        }
        assert_eq!(center.len(), DEFAULT_CAPACITY);
        assert_eq!(center.latest().unwrap().text, "note 19");
    }
}
