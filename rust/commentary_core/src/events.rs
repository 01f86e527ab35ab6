//! Events the thread emits for the UI layer to present.

use std::collections::VecDeque;

use serde::Serialize;

use crate::config::{NotificationConfig, ToastPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub timeout_ms: u32,
    pub position: ToastPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ThreadEvent {
    /// Thread or form state changed; re-render.
    StateChanged,
    Notify(Notification),
}

/// Host-drained event buffer.
#[derive(Debug, Default)]
pub struct EventQueue {
    style: NotificationConfig,
    pending: VecDeque<ThreadEvent>,
}

impl EventQueue {
    pub fn new(style: NotificationConfig) -> Self {
        Self { style, pending: VecDeque::new() }
    }

    /// Queue a re-render signal, folding it into one already at the back.
    pub fn changed(&mut self) {
        if self.pending.back() != Some(&ThreadEvent::StateChanged) {
            self.pending.push_back(ThreadEvent::StateChanged);
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.pending.push_back(ThreadEvent::Notify(Notification {
            level,
            message: message.into(),
            timeout_ms: self.style.timeout_ms,
            position: self.style.position,
        }));
    }

    pub fn drain(&mut self) -> Vec<ThreadEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn consecutive_changes_coalesce() {
        let mut q = EventQueue::new(NotificationConfig::default());
        q.changed();
        q.changed();
        q.notify(NotificationLevel::Success, "Comment Added!");
        q.changed();
        assert_eq!(q.len(), 3);
        let drained = q.drain();
        assert_eq!(drained[0], ThreadEvent::StateChanged);
        assert!(matches!(&drained[1], ThreadEvent::Notify(n) if n.message == "Comment Added!"));
        assert!(q.is_empty());
    }

    #[test]
    fn notifications_carry_style_and_serialize() {
        let mut q = EventQueue::new(NotificationConfig { timeout_ms: 1500, position: ToastPosition::TopLeft });
        q.notify(NotificationLevel::Warning, "Comment deleted");
        let events = q.drain();
        assert_eq!(
            serde_json::to_value(&events).unwrap(),
            json!([{
                "type": "notify",
                "level": "warning",
                "message": "Comment deleted",
                "timeoutMs": 1500,
                "position": "topLeft"
            }])
        );
    }
}
