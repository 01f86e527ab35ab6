//! Page-provided thread configuration.

use serde::{Deserialize, Serialize};

use crate::comment::{Comment, NodeId};
use crate::error::Result;
use crate::identity::CurrentUser;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    pub node_id: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToastPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationConfig {
    pub timeout_ms: u32,
    pub position: ToastPosition,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { timeout_ms: 3000, position: ToastPosition::TopRight }
    }
}

/// UI strings the renderer uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub heading: String,
    pub reply_prompt: String,
    pub login_prompt: String,
    pub login_url: String,
    pub submit: String,
    pub edit: String,
    pub delete: String,
    pub placeholder: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            heading: "Comments".into(),
            reply_prompt: "Reply to this comment...".into(),
            login_prompt: "Log in to reply".into(),
            login_url: "/login".into(),
            submit: "Publish".into(),
            edit: "Edit".into(),
            delete: "Delete".into(),
            placeholder: "Help the author improve this page".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadConfig {
    pub node: NodeRef,
    #[serde(default)]
    pub current_user: Option<CurrentUser>,
    #[serde(default)]
    pub initial_comments: Vec<Comment>,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub labels: Labels,
}

impl ThreadConfig {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node: NodeRef { node_id },
            current_user: None,
            initial_comments: Vec::new(),
            notifications: NotificationConfig::default(),
            labels: Labels::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.initial_comments = comments;
        self
    }

    pub fn with_user(mut self, user: CurrentUser) -> Self {
        self.current_user = Some(user);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThreadError;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = ThreadConfig::from_json(r#"{"node":{"nodeId":7}}"#).unwrap();
        assert_eq!(config, ThreadConfig::new(NodeId(7)));
        assert_eq!(config.notifications.timeout_ms, 3000);
        assert_eq!(config.labels.reply_prompt, "Reply to this comment...");
    }

    #[test]
    fn full_config_parses() {
        let config = ThreadConfig::from_json(
            r#"{
                "node": {"nodeId": 7},
                "currentUser": {"id": 2, "username": "ana"},
                "initialComments": [
                    {"commentId": 1, "rawCommentText": "a", "htmlCommentText": "<p>a</p>"},
                    {"commentId": 2, "replyTo": 1, "rawCommentText": "b", "htmlCommentText": "<p>b</p>"}
                ],
                "notifications": {"position": "bottomLeft"},
                "labels": {"submit": "Send"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.current_user.as_ref().map(|u| u.username.as_str()), Some("ana"));
        assert_eq!(config.initial_comments.len(), 2);
        assert_eq!(config.notifications.position, ToastPosition::BottomLeft);
        assert_eq!(config.notifications.timeout_ms, 3000);
        assert_eq!(config.labels.submit, "Send");
        assert_eq!(config.labels.edit, "Edit");
    }

    #[test]
    fn missing_node_is_a_config_error() {
        assert!(matches!(ThreadConfig::from_json("{}"), Err(ThreadError::Config(_))));
    }
}
