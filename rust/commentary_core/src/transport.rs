//! The HTTP collaborator, seen from the thread.
//!
//! Implementations perform the request and hand back the JSON payload
//! untouched; validating it is the coordinator's job (see [`crate::wire`]).
//! Futures are not required to be `Send`: the thread runs on a single
//! cooperative executor (a browser event loop or a current-thread runtime).

use std::future::Future;

use serde_json::Value;

use crate::error::TransportError;
use crate::wire::{CreateRequest, DeleteRequest, UpdateRequest};

pub type TransportResult = Result<Value, TransportError>;

pub trait Transport {
    fn create_comment(&self, request: &CreateRequest) -> impl Future<Output = TransportResult>;

    fn update_comment(&self, request: &UpdateRequest) -> impl Future<Output = TransportResult>;

    fn delete_comment(&self, request: &DeleteRequest) -> impl Future<Output = TransportResult>;
}
