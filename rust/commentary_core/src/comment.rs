//! Comment records as the server sends them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned comment identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CommentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identity of the page node a thread hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single posted message. Replies are never stored here; see [`crate::tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: CommentId,
    #[serde(default)]
    pub reply_to: Option<CommentId>,
    #[serde(rename = "rawCommentText", alias = "rawText")]
    pub raw_text: String,
    #[serde(rename = "htmlCommentText", alias = "renderedText")]
    pub rendered_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Comment {
    pub fn new(comment_id: CommentId, raw_text: impl Into<String>, rendered_text: impl Into<String>) -> Self {
        Self {
            comment_id,
            reply_to: None,
            raw_text: raw_text.into(),
            rendered_text: rendered_text.into(),
            author: None,
            created_at: None,
        }
    }

    pub fn reply(comment_id: CommentId, parent: CommentId, raw_text: impl Into<String>, rendered_text: impl Into<String>) -> Self {
        Self { reply_to: Some(parent), ..Self::new(comment_id, raw_text, rendered_text) }
    }

    pub fn is_top_level(&self) -> bool { self.reply_to.is_none() }

    /// Raw and rendered text always move together.
    pub fn set_text(&mut self, raw_text: impl Into<String>, rendered_text: impl Into<String>) {
        self.raw_text = raw_text.into();
        self.rendered_text = rendered_text.into();
    }
}
