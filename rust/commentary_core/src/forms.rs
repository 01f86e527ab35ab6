//! Form-state registry: draft text and visibility per comment form.
//!
//! Forms are addressed by a structured [`FormId`]. The string forms
//! (`main`, `reply-<id>`, `edit-<id>`) exist only at the host boundary.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::comment::{Comment, CommentId};
use crate::error::ThreadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    /// The single top-level "new comment" form.
    Main,
    Reply(CommentId),
    Edit(CommentId),
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormId::Main => f.write_str("main"),
            FormId::Reply(id) => write!(f, "reply-{id}"),
            FormId::Edit(id) => write!(f, "edit-{id}"),
        }
    }
}

impl FromStr for FormId {
    type Err = ThreadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "main" {
            return Ok(FormId::Main);
        }
        let unknown = || ThreadError::UnknownForm(s.to_owned());
        let (role, id) = s.split_once('-').ok_or_else(unknown)?;
        // Plain digits without leading zeros, so the string form round-trips.
        let canonical =
            !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) && (id == "0" || !id.starts_with('0'));
        if !canonical {
            return Err(unknown());
        }
        let id = id.parse::<u64>().map(CommentId).map_err(|_| unknown())?;
        match role {
            "reply" => Ok(FormId::Reply(id)),
            "edit" => Ok(FormId::Edit(id)),
            _ => Err(unknown()),
        }
    }
}

impl Serialize for FormId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FormId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub draft: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    entries: HashMap<FormId, FormState>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for a freshly loaded thread: an empty main draft plus the
    /// per-comment entries for every seed comment.
    pub fn seeded<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Self {
        let mut registry = Self::new();
        registry.set_draft(FormId::Main, "");
        for comment in comments {
            registry.register_comment(comment);
        }
        registry
    }

    /// Create the hidden edit entry (and reply entry for top-level comments)
    /// that every rendered comment carries.
    pub fn register_comment(&mut self, comment: &Comment) {
        self.entries.insert(
            FormId::Edit(comment.comment_id),
            FormState { draft: comment.raw_text.clone(), visible: false },
        );
        if comment.is_top_level() {
            self.entries.insert(FormId::Reply(comment.comment_id), FormState::default());
        }
    }

    pub fn set_draft(&mut self, form: FormId, text: impl Into<String>) {
        self.entries.entry(form).or_default().draft = text.into();
    }

    pub fn set_visible(&mut self, form: FormId, visible: bool) {
        self.entries.entry(form).or_default().visible = visible;
    }

    /// Flip visibility. An untouched form counts as hidden, so the first
    /// toggle shows it. Returns the new value.
    pub fn toggle_visible(&mut self, form: FormId) -> bool {
        let entry = self.entries.entry(form).or_default();
        entry.visible = !entry.visible;
        entry.visible
    }

    /// Never fails: unknown forms read as hidden with an empty draft.
    pub fn get(&self, form: FormId) -> FormState {
        self.entries.get(&form).cloned().unwrap_or_default()
    }

    pub fn draft(&self, form: FormId) -> &str {
        self.entries.get(&form).map(|s| s.draft.as_str()).unwrap_or("")
    }

    pub fn is_visible(&self, form: FormId) -> bool {
        self.entries.get(&form).is_some_and(|s| s.visible)
    }

    pub fn contains(&self, form: FormId) -> bool {
        self.entries.contains_key(&form)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
