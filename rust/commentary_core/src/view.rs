//! Render-ready snapshot of a thread: the reply tree joined with form state.

use serde::Serialize;

use crate::comment::{Comment, CommentId};
use crate::forms::{FormId, FormRegistry, FormState};
use crate::identity::CurrentUser;
use crate::store::ThreadStore;
use crate::tree::ThreadNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub can_modify: bool,
    pub edit_form: FormState,
    /// Present only on top-level comments.
    pub reply_form: Option<FormState>,
    pub replies: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadView {
    pub comment_count: usize,
    pub can_reply: bool,
    pub main_form: FormState,
    pub comments: Vec<CommentView>,
}

impl ThreadView {
    pub fn build(store: &ThreadStore, forms: &FormRegistry, user: Option<&CurrentUser>) -> Self {
        let leaf = |comment: &Comment| CommentView {
            comment: comment.clone(),
            can_modify: user.is_some_and(|u| u.can_modify(comment)),
            edit_form: forms.get(FormId::Edit(comment.comment_id)),
            reply_form: None,
            replies: Vec::new(),
        };
        let comments = store
            .tree()
            .into_iter()
            .map(|ThreadNode { comment, replies }| CommentView {
                reply_form: Some(forms.get(FormId::Reply(comment.comment_id))),
                replies: replies.into_iter().map(&leaf).collect(),
                ..leaf(comment)
            })
            .collect();

        // The main form has no visibility toggle.
        let main_form = FormState { visible: true, ..forms.get(FormId::Main) };
        Self {
            comment_count: store.len(),
            can_reply: user.is_some(),
            main_form,
            comments,
        }
    }

    pub fn find(&self, id: CommentId) -> Option<&CommentView> {
        self.comments
            .iter()
            .flat_map(|c| std::iter::once(c).chain(c.replies.iter()))
            .find(|c| c.comment.comment_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> (ThreadStore, FormRegistry) {
        let mut own = Comment::new(CommentId(1), "a", "<p>a</p>");
        own.author = Some("ana".into());
        let store = ThreadStore::from_seed([
            own,
            Comment::reply(CommentId(2), CommentId(1), "b", "<p>b</p>"),
            Comment::reply(CommentId(3), CommentId(40), "orphan", "<p>orphan</p>"),
        ]);
        let forms = FormRegistry::seeded(store.all());
        (store, forms)
    }

    #[test]
    fn joins_tree_with_form_state() {
        let (store, mut forms) = fixture();
        forms.set_visible(FormId::Reply(CommentId(1)), true);
        forms.set_draft(FormId::Main, "typing");
        let user = CurrentUser { id: 1, username: "ana".into(), admin: false };

        let view = ThreadView::build(&store, &forms, Some(&user));
        assert_eq!(view.comment_count, 3);
        assert!(view.can_reply);
        assert_eq!(view.main_form, FormState { draft: "typing".into(), visible: true });
        assert_eq!(view.comments.len(), 1);

        let top = &view.comments[0];
        assert!(top.can_modify);
        assert_eq!(top.reply_form, Some(FormState { draft: String::new(), visible: true }));
        assert_eq!(top.edit_form.draft, "a");
        assert_eq!(top.replies.len(), 1);
        assert!(!top.replies[0].can_modify);
        assert_eq!(top.replies[0].reply_form, None);
        assert!(view.find(CommentId(3)).is_none());
    }

    #[test]
    fn anonymous_view_serializes_flat_comment_fields() {
        let (store, forms) = fixture();
        let view = ThreadView::build(&store, &forms, None);
        assert!(!view.can_reply);

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["comments"][0]["commentId"], json!(1));
        assert_eq!(value["comments"][0]["htmlCommentText"], json!("<p>a</p>"));
        assert_eq!(value["comments"][0]["replies"][0]["replyTo"], json!(1));
        assert_eq!(value["comments"][0]["replies"][0]["replyForm"], json!(null));
    }
}
