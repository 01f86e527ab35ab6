//! Current-actor context. Consulted for display only.

use serde::{Deserialize, Serialize};

use crate::comment::Comment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub admin: bool,
}

impl CurrentUser {
    /// Whether edit/delete controls should be offered for `comment`.
    pub fn can_modify(&self, comment: &Comment) -> bool {
        self.admin || comment.author.as_deref() == Some(self.username.as_str())
    }
}
