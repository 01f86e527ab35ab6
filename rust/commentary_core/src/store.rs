//! Canonical flat comment collection, unique by id, in display order.

use tracing::{debug, error, warn};

use crate::comment::{Comment, CommentId};
use crate::error::{Result, ThreadError};
use crate::tree::{self, ThreadNode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadStore {
    comments: Vec<Comment>,
}

impl ThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the server seed. Later duplicates of an id are dropped.
    pub fn from_seed(seed: impl IntoIterator<Item = Comment>) -> Self {
        let mut store = Self::new();
        for comment in seed {
            if store.contains(comment.comment_id) {
                warn!(comment_id = %comment.comment_id, "duplicate comment in seed, keeping the first");
                continue;
            }
            store.comments.push(comment);
        }
        store
    }

    /// Append a comment. A duplicate id is rejected and the collection is
    /// left untouched.
    pub fn insert(&mut self, comment: Comment) -> Result<()> {
        if self.contains(comment.comment_id) {
            error!(comment_id = %comment.comment_id, "refusing to insert duplicate comment");
            return Err(ThreadError::DuplicateComment(comment.comment_id));
        }
        self.comments.push(comment);
        Ok(())
    }

    /// Apply `updater` to a copy of the first comment with `id` and store the
    /// result in place. Returns false if the id is absent or the updater
    /// tried to change the id.
    pub fn replace(&mut self, id: CommentId, updater: impl FnOnce(&mut Comment)) -> bool {
        let Some(slot) = self.comments.iter_mut().find(|c| c.comment_id == id) else {
            debug!(comment_id = %id, "replace skipped, comment not in thread");
            return false;
        };
        let mut updated = slot.clone();
        updater(&mut updated);
        if updated.comment_id != id {
            error!(comment_id = %id, new_id = %updated.comment_id, "replace may not change the comment id");
            return false;
        }
        *slot = updated;
        true
    }

    /// Remove every comment with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: CommentId) -> usize {
        let before = self.comments.len();
        self.comments.retain(|c| c.comment_id != id);
        let removed = before - self.comments.len();
        if removed == 0 {
            debug!(comment_id = %id, "remove skipped, comment not in thread");
        }
        removed
    }

    pub fn all(&self) -> &[Comment] {
        &self.comments
    }

    pub fn get(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.comment_id == id)
    }

    pub fn contains(&self, id: CommentId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn tree(&self) -> Vec<ThreadNode<'_>> {
        tree::build(&self.comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c(id: u64) -> Comment {
        Comment::new(CommentId(id), format!("raw {id}"), format!("<p>raw {id}</p>"))
    }

    fn ids(store: &ThreadStore) -> Vec<u64> {
        store.all().iter().map(|c| c.comment_id.0).collect()
    }

    #[test]
    fn insert_appends_once_and_keeps_order() {
        let mut store = ThreadStore::from_seed([c(3), c(1)]);
        store.insert(c(2)).unwrap();
        assert_eq!(ids(&store), vec![3, 1, 2]);
    }

    #[test]
    fn insert_rejects_duplicates_without_touching_collection() {
        let mut store = ThreadStore::from_seed([c(1), c(2)]);
        let mut dup = c(1);
        dup.raw_text = "other".into();
        let before = store.clone();

        let err = store.insert(dup).unwrap_err();
        assert!(matches!(err, ThreadError::DuplicateComment(CommentId(1))));
        assert_eq!(store, before);
    }

    #[test]
    fn seed_drops_later_duplicates() {
        let mut second = c(1);
        second.raw_text = "second".into();
        let store = ThreadStore::from_seed([c(1), c(2), second]);
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.get(CommentId(1)).unwrap().raw_text, "raw 1");
    }

    #[test]
    fn replace_touches_only_target() {
        let mut store = ThreadStore::from_seed([c(1), c(2), c(3)]);
        assert!(store.replace(CommentId(2), |c| c.set_text("new", "<p>new</p>")));

        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.all()[0], c(1));
        assert_eq!(store.all()[2], c(3));
        let updated = store.get(CommentId(2)).unwrap();
        assert_eq!(updated.raw_text, "new");
        assert_eq!(updated.rendered_text, "<p>new</p>");
    }

    #[test]
    fn replace_missing_or_id_change_is_noop() {
        let mut store = ThreadStore::from_seed([c(1)]);
        assert!(!store.replace(CommentId(9), |c| c.raw_text.clear()));
        assert!(!store.replace(CommentId(1), |c| c.comment_id = CommentId(5)));
        assert_eq!(store.all(), &[c(1)]);
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut store = ThreadStore::from_seed([c(1), c(2)]);
        assert_eq!(store.remove(CommentId(1)), 1);
        assert_eq!(store.remove(CommentId(1)), 0);
        assert_eq!(ids(&store), vec![2]);
    }

    #[test]
    fn removing_parent_orphans_its_replies() {
        let mut store = ThreadStore::from_seed([
            c(5),
            Comment::reply(CommentId(6), CommentId(5), "r", "r"),
            c(7),
        ]);
        store.remove(CommentId(5));
        let tree = store.tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].comment.comment_id, CommentId(7));
        assert!(tree[0].replies.is_empty());
    }
}
