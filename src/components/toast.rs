use crate::error::AppResult;
use askama::Template;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

impl NotificationLevel {
    fn css_class(self) -> &'static str {
        match self {
            NotificationLevel::Success => "bg-green-600",
            NotificationLevel::Error => "bg-red-600",
            NotificationLevel::Info => "bg-blue-600",
        }
    }
}

/// A transient message shown once and then dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

struct ToastView {
    class: &'static str,
    message: String,
}

#[derive(Template)]
#[template(path = "components/toasts.html")]
pub struct Toasts {
    toasts: Vec<ToastView>,
}

impl Toasts {
    pub fn render_all(notifications: &[Notification]) -> AppResult<String> {
        if notifications.is_empty() {
            return Ok(String::new());
        }

        let toasts = notifications
            .iter()
            .map(|n| ToastView {
                class: n.level.css_class(),
                message: n.message.clone(),
            })
            .collect();

        Ok(Toasts { toasts }.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_notifications_no_markup() {
        assert_eq!(Toasts::render_all(&[]).unwrap(), "");
    }

    #[test]
    fn test_messages_are_escaped() {
        let html = Toasts::render_all(&[Notification::error("<b>nope</b>")]).unwrap();
        assert!(html.contains("bg-red-600"));
        assert!(html.contains("nope"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("</b>"));
    }
}
