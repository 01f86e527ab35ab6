//! Reconstructs the one-level reply hierarchy from a flat comment list.
//!
//! Only comments without a `reply_to` can be parents. A reply whose parent
//! is missing (or is itself a reply) is an orphan and is left out. Deeper
//! nesting would need recursive grouping by parent id with cycle detection.

use std::collections::HashMap;

use serde::Serialize;

use crate::comment::{Comment, CommentId};

/// A top-level comment with its replies, borrowed from the canonical list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadNode<'a> {
    pub comment: &'a Comment,
    pub replies: Vec<&'a Comment>,
}

/// Build the display tree. The input is never modified; top-level order and
/// per-parent reply order follow the input order.
pub fn build(comments: &[Comment]) -> Vec<ThreadNode<'_>> {
    let mut nodes: Vec<ThreadNode<'_>> = Vec::new();
    let mut index: HashMap<CommentId, usize> = HashMap::new();

    for comment in comments.iter().filter(|c| c.is_top_level()) {
        // First parent with a given id wins.
        index.entry(comment.comment_id).or_insert(nodes.len());
        nodes.push(ThreadNode { comment, replies: Vec::new() });
    }

    for reply in comments.iter().filter(|c| !c.is_top_level()) {
        let parent = reply.reply_to.and_then(|id| index.get(&id).copied());
        match parent {
            Some(i) => nodes[i].replies.push(reply),
            None => tracing::debug!(comment_id = %reply.comment_id, "dropping orphan reply"),
        }
    }
    nodes
}

/// Number of comments the tree actually displays.
pub fn displayed_count(nodes: &[ThreadNode<'_>]) -> usize {
    nodes.iter().map(|n| 1 + n.replies.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn top(id: u64) -> Comment {
        Comment::new(CommentId(id), format!("c{id}"), format!("<p>c{id}</p>"))
    }

    fn reply(id: u64, parent: u64) -> Comment {
        Comment::reply(CommentId(id), CommentId(parent), format!("r{id}"), format!("<p>r{id}</p>"))
    }

    fn ids(nodes: &[ThreadNode<'_>]) -> Vec<(u64, Vec<u64>)> {
        nodes
            .iter()
            .map(|n| (n.comment.comment_id.0, n.replies.iter().map(|r| r.comment_id.0).collect()))
            .collect()
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn nests_reply_under_parent() {
        let comments = vec![top(1), reply(2, 1)];
        assert_eq!(ids(&build(&comments)), vec![(1, vec![2])]);
    }

    #[test]
    fn keeps_input_order_for_parents_and_replies() {
        let comments = vec![reply(10, 2), top(1), reply(11, 1), top(2), reply(12, 2), reply(13, 1)];
        assert_eq!(ids(&build(&comments)), vec![(1, vec![11, 13]), (2, vec![10, 12])]);
    }

    #[test]
    fn orphans_and_nested_replies_are_dropped() {
        let comments = vec![top(1), reply(2, 1), reply(3, 2), reply(4, 77)];
        let tree = build(&comments);
        assert_eq!(ids(&tree), vec![(1, vec![2])]);
        assert_eq!(displayed_count(&tree), 2);
    }

    #[test]
    fn building_twice_is_stable() {
        let comments = vec![top(1), reply(2, 1), top(3)];
        let snapshot = comments.clone();
        assert_eq!(build(&comments), build(&comments));
        assert_eq!(comments, snapshot);
    }

    fn arb_thread() -> impl Strategy<Value = Vec<Comment>> {
        (1usize..8, prop::collection::vec((0usize..8, any::<bool>()), 0..24)).prop_map(|(parents, children)| {
            let mut out: Vec<Comment> = (1..=parents as u64).map(top).collect();
            for (i, (slot, front)) in children.into_iter().enumerate() {
                let c = reply(100 + i as u64, (slot % parents) as u64 + 1);
                if front {
                    out.insert(0, c);
                } else {
                    out.push(c);
                }
            }
            out
        })
    }

    proptest! {
        #[test]
        fn every_comment_lands_exactly_once(comments in arb_thread()) {
            let tree = build(&comments);
            let tops: Vec<_> = comments.iter().filter(|c| c.is_top_level()).map(|c| c.comment_id).collect();
            prop_assert_eq!(tree.iter().map(|n| n.comment.comment_id).collect::<Vec<_>>(), tops);

            for node in &tree {
                let expected: Vec<_> = comments
                    .iter()
                    .filter(|c| c.reply_to == Some(node.comment.comment_id))
                    .map(|c| c.comment_id)
                    .collect();
                prop_assert_eq!(node.replies.iter().map(|r| r.comment_id).collect::<Vec<_>>(), expected);
            }
            prop_assert_eq!(displayed_count(&tree), comments.len());
        }
    }
}
