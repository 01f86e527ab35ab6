//! Turns user actions into transport requests and applies confirmed results.
//!
//! Local state changes only after the server answers: the draft is read,
//! the request is awaited with no borrow held, and the whole update is
//! applied in one step or not at all. Several actions may be in flight at
//! once; actions on the same comment resolve last-write-wins.

use std::cell::RefCell;

use tracing::{debug, info, warn};

use crate::comment::{Comment, CommentId, NodeId};
use crate::config::{Labels, ThreadConfig};
use crate::error::{Result, ThreadError};
use crate::events::{EventQueue, NotificationLevel, ThreadEvent};
use crate::forms::{FormId, FormRegistry, FormState};
use crate::identity::CurrentUser;
use crate::render;
use crate::store::ThreadStore;
use crate::transport::Transport;
use crate::view::ThreadView;
use crate::wire::{self, Action, CreateRequest, DeleteRequest, UpdateRequest, UpdatedText};

#[derive(Debug)]
struct ThreadState {
    store: ThreadStore,
    forms: FormRegistry,
    events: EventQueue,
}

impl ThreadState {
    fn fail(&mut self, action: Action, err: &ThreadError) {
        warn!(action = action.as_str(), error = %err, "comment action failed");
        self.events
            .notify(NotificationLevel::Error, format!("Could not {} comment: {err}", action.as_str()));
    }
}

/// Owns one rendered thread: its comments, its form state and its pending
/// UI events.
#[derive(Debug)]
pub struct ThreadCoordinator {
    node_id: NodeId,
    current_user: Option<CurrentUser>,
    labels: Labels,
    state: RefCell<ThreadState>,
}

impl ThreadCoordinator {
    pub fn new(config: ThreadConfig) -> Self {
        let store = ThreadStore::from_seed(config.initial_comments);
        let forms = FormRegistry::seeded(store.all());
        debug!(node_id = %config.node.node_id, comments = store.len(), "thread loaded");
        Self {
            node_id: config.node.node_id,
            current_user: config.current_user,
            labels: config.labels,
            state: RefCell::new(ThreadState { store, forms, events: EventQueue::new(config.notifications) }),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(ThreadConfig::from_json(json)?))
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    // Form state

    pub fn set_draft(&self, form: FormId, text: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state.forms.set_draft(form, text);
        state.events.changed();
    }

    pub fn set_form_visible(&self, form: FormId, visible: bool) {
        let mut state = self.state.borrow_mut();
        state.forms.set_visible(form, visible);
        state.events.changed();
    }

    pub fn toggle_form(&self, form: FormId) -> bool {
        let mut state = self.state.borrow_mut();
        let visible = state.forms.toggle_visible(form);
        state.events.changed();
        visible
    }

    pub fn form(&self, form: FormId) -> FormState {
        self.state.borrow().forms.get(form)
    }

    // Reads

    pub fn comments(&self) -> Vec<Comment> {
        self.state.borrow().store.all().to_vec()
    }

    pub fn comment(&self, id: CommentId) -> Option<Comment> {
        self.state.borrow().store.get(id).cloned()
    }

    pub fn view(&self) -> ThreadView {
        let state = self.state.borrow();
        ThreadView::build(&state.store, &state.forms, self.current_user.as_ref())
    }

    pub fn to_html(&self) -> String {
        render::to_html(&self.view(), &self.labels)
    }

    pub fn drain_events(&self) -> Vec<ThreadEvent> {
        self.state.borrow_mut().events.drain()
    }

    // Mutations

    /// Delete a comment on the server, then drop it locally. Its form entries
    /// stay behind and its replies become orphans.
    pub async fn delete<T: Transport>(&self, transport: &T, id: CommentId) -> Result<()> {
        debug!(comment_id = %id, "deleting comment");
        let outcome = request_delete(transport, &DeleteRequest::new(id)).await;

        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(()) => {
                state.store.remove(id);
                state.events.changed();
                state.events.notify(NotificationLevel::Warning, "Comment deleted");
                info!(comment_id = %id, "comment deleted");
                Ok(())
            }
            Err(err) => {
                state.fail(Action::Delete, &err);
                Err(err)
            }
        }
    }

    /// Submit whatever draft `form` holds: edit forms update their comment,
    /// main and reply forms create a new one.
    pub async fn submit<T: Transport>(&self, transport: &T, form: FormId) -> Result<()> {
        match form {
            FormId::Edit(id) => self.submit_edit(transport, form, id).await,
            FormId::Main => self.submit_new(transport, form, None).await,
            FormId::Reply(parent) => self.submit_new(transport, form, Some(parent)).await,
        }
    }

    async fn submit_edit<T: Transport>(&self, transport: &T, form: FormId, id: CommentId) -> Result<()> {
        let body = self.state.borrow().forms.draft(form).to_owned();
        debug!(comment_id = %id, %form, "updating comment");
        let outcome = request_update(transport, &UpdateRequest::new(id, body)).await.and_then(|updated| {
            if updated.comment_id == id {
                Ok(updated)
            } else {
                Err(ThreadError::malformed(
                    Action::Update.as_str(),
                    format!("expected comment {id}, got {}", updated.comment_id),
                ))
            }
        });

        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(UpdatedText { raw_text, rendered_text, .. }) => {
                if !state.store.replace(id, |c| c.set_text(raw_text, rendered_text)) {
                    debug!(comment_id = %id, "edited comment is no longer in the thread");
                }
                state.forms.set_visible(form, false);
                state.events.changed();
                state.events.notify(NotificationLevel::Success, "Comment Updated!");
                info!(comment_id = %id, "comment updated");
                Ok(())
            }
            Err(err) => {
                state.fail(Action::Update, &err);
                Err(err)
            }
        }
    }

    async fn submit_new<T: Transport>(&self, transport: &T, form: FormId, reply_to: Option<CommentId>) -> Result<()> {
        let body = self.state.borrow().forms.draft(form).to_owned();
        debug!(%form, ?reply_to, "creating comment");
        let outcome = request_create(transport, &CreateRequest::new(self.node_id, body, reply_to)).await;

        let mut state = self.state.borrow_mut();
        let inserted = outcome.and_then(|comment| {
            state.store.insert(comment.clone())?;
            Ok(comment)
        });
        match inserted {
            Ok(comment) => {
                state.forms.set_draft(form, "");
                state.forms.register_comment(&comment);
                if form != FormId::Main {
                    state.forms.set_visible(form, false);
                }
                state.events.changed();
                state.events.notify(NotificationLevel::Success, "Comment Added!");
                info!(comment_id = %comment.comment_id, reply_to = ?comment.reply_to, "comment added");
                Ok(())
            }
            Err(err) => {
                state.fail(Action::Create, &err);
                Err(err)
            }
        }
    }
}

async fn request_create<T: Transport>(transport: &T, request: &CreateRequest) -> Result<Comment> {
    let payload = transport.create_comment(request).await?;
    wire::decode_created(payload)
}

async fn request_update<T: Transport>(transport: &T, request: &UpdateRequest) -> Result<UpdatedText> {
    let payload = transport.update_comment(request).await?;
    wire::decode_updated(payload)
}

async fn request_delete<T: Transport>(transport: &T, request: &DeleteRequest) -> Result<()> {
    let payload = transport.delete_comment(request).await?;
    wire::decode_deleted(payload)
}
