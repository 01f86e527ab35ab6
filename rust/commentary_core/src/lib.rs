//! Comment thread state: one-level reply trees, per-form drafts and
//! server-confirmed create/edit/delete.

pub mod comment;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod forms;
pub mod identity;
pub mod render;
pub mod store;
pub mod transport;
pub mod tree;
pub mod view;
pub mod wire;

pub use comment::{Comment, CommentId, NodeId};
pub use config::{Labels, NotificationConfig, ThreadConfig, ToastPosition};
pub use coordinator::ThreadCoordinator;
pub use error::{Result, ThreadError, TransportError};
pub use events::{Notification, NotificationLevel, ThreadEvent};
pub use forms::{FormId, FormRegistry, FormState};
pub use identity::CurrentUser;
pub use store::ThreadStore;
pub use transport::{Transport, TransportResult};
pub use view::{CommentView, ThreadView};
pub use wire::{CreateRequest, DeleteRequest, UpdateRequest};
