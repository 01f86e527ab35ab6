//! Request bodies handed to the transport and decoding of its responses.
//!
//! Create and update answer with `{"comment": [record]}`; delete answers
//! with `{"success": bool}`. Anything else is malformed, and decoding happens
//! before any local state is touched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::comment::{Comment, CommentId, NodeId};
use crate::error::{Result, ThreadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRequest {
    #[serde(rename = "id")]
    pub node_id: NodeId,
    pub body: String,
    pub reply_to: Option<CommentId>,
    react: bool,
}

impl CreateRequest {
    pub fn new(node_id: NodeId, body: impl Into<String>, reply_to: Option<CommentId>) -> Self {
        Self { node_id, body: body.into(), reply_to, react: true }
    }

    pub fn path(&self) -> String {
        format!("/comment/create/{}", self.node_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    #[serde(rename = "id")]
    pub comment_id: CommentId,
    pub body: String,
    react: bool,
}

impl UpdateRequest {
    pub fn new(comment_id: CommentId, body: impl Into<String>) -> Self {
        Self { comment_id, body: body.into(), react: true }
    }

    pub fn path(&self) -> String {
        format!("/comment/update/{}", self.comment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRequest {
    #[serde(rename = "id")]
    pub comment_id: CommentId,
    react: bool,
}

impl DeleteRequest {
    pub fn new(comment_id: CommentId) -> Self {
        Self { comment_id, react: true }
    }

    pub fn path(&self) -> String {
        format!("/comment/delete/{}", self.comment_id)
    }
}

/// The part of an update response the thread applies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedText {
    pub comment_id: CommentId,
    #[serde(rename = "rawCommentText", alias = "rawText")]
    pub raw_text: String,
    #[serde(rename = "htmlCommentText", alias = "renderedText")]
    pub rendered_text: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    comment: Vec<T>,
}

#[derive(Deserialize)]
struct DeleteAck {
    success: bool,
}

fn first_record<T: DeserializeOwned>(action: Action, payload: Value) -> Result<T> {
    let envelope: Envelope<T> =
        serde_json::from_value(payload).map_err(|e| ThreadError::malformed(action.as_str(), e.to_string()))?;
    envelope
        .comment
        .into_iter()
        .next()
        .ok_or_else(|| ThreadError::malformed(action.as_str(), "empty `comment` list"))
}

pub fn decode_created(payload: Value) -> Result<Comment> {
    first_record(Action::Create, payload)
}

pub fn decode_updated(payload: Value) -> Result<UpdatedText> {
    first_record(Action::Update, payload)
}

pub fn decode_deleted(payload: Value) -> Result<()> {
    let ack: DeleteAck = serde_json::from_value(payload)
        .map_err(|e| ThreadError::malformed(Action::Delete.as_str(), e.to_string()))?;
    if ack.success {
        Ok(())
    } else {
        Err(ThreadError::Rejected { action: Action::Delete.as_str() })
    }
}
