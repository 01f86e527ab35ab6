use std::rc::Rc;

use commentary_core::{
    CommentId, CreateRequest, DeleteRequest, FormId, ThreadCoordinator, ThreadError, Transport, TransportError,
    TransportResult, UpdateRequest,
};
use js_sys::{Function, Promise, Reflect};
use serde_json::Value;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

/// Host transport: an object with `createComment`, `updateComment` and
/// `deleteComment`, each called as `fn(path, requestJson)` and returning a
/// Promise of the response (JSON string or plain object).
struct JsTransport {
    create: Function,
    update: Function,
    delete: Function,
}

impl JsTransport {
    fn from_object(obj: &JsValue) -> Result<Self, JsValue> {
        let method = |name: &str| -> Result<Function, JsValue> {
            Reflect::get(obj, &JsValue::from_str(name))?
                .dyn_into::<Function>()
                .map_err(|_| JsValue::from_str(&format!("transport.{name} must be a function")))
        };
        Ok(Self { create: method("createComment")?, update: method("updateComment")?, delete: method("deleteComment")? })
    }

    async fn call(&self, func: &Function, path: String, body: String) -> TransportResult {
        let returned = func
            .call2(&JsValue::NULL, &JsValue::from_str(&path), &JsValue::from_str(&body))
            .map_err(js_error)?;
        let resolved = JsFuture::from(Promise::resolve(&returned)).await.map_err(js_error)?;
        Ok(payload_from_js(&resolved))
    }
}

/// The transport call itself succeeded, so an unreadable response is handed
/// on as a payload the core rejects as malformed, not as a network failure.
fn payload_from_js(resolved: &JsValue) -> Value {
    if resolved.is_undefined() || resolved.is_null() {
        return Value::Null;
    }
    if let Some(text) = resolved.as_string() {
        return payload_from_text(text);
    }
    js_sys::JSON::stringify(resolved)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or(Value::Null)
}

fn payload_from_text(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Largest integer a JS number carries exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn comment_id_from_js(value: f64) -> Result<CommentId, JsValue> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= MAX_SAFE_INTEGER {
        Ok(CommentId(value as u64))
    } else {
        Err(JsValue::from_str(&format!("invalid comment id: {value}")))
    }
}

fn js_error(value: JsValue) -> TransportError {
    let message = value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| "request failed".to_owned());
    TransportError::Network(message)
}

fn request_body<T: serde::Serialize>(request: &T) -> String {
    serde_json::to_string(request).unwrap_or_else(|_| "{}".to_string())
}

impl Transport for JsTransport {
    async fn create_comment(&self, request: &CreateRequest) -> TransportResult {
        self.call(&self.create, request.path(), request_body(request)).await
    }

    async fn update_comment(&self, request: &UpdateRequest) -> TransportResult {
        self.call(&self.update, request.path(), request_body(request)).await
    }

    async fn delete_comment(&self, request: &DeleteRequest) -> TransportResult {
        self.call(&self.delete, request.path(), request_body(request)).await
    }
}

fn to_js(err: ThreadError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_form(form_id: &str) -> Result<FormId, JsValue> {
    form_id.parse().map_err(to_js)
}

#[wasm_bindgen]
pub struct CommentThread {
    core: Rc<ThreadCoordinator>,
    transport: Rc<JsTransport>,
}

#[wasm_bindgen]
impl CommentThread {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: String, transport: JsValue) -> Result<CommentThread, JsValue> {
        let core = ThreadCoordinator::from_json(&config_json).map_err(to_js)?;
        let transport = JsTransport::from_object(&transport)?;
        Ok(CommentThread { core: Rc::new(core), transport: Rc::new(transport) })
    }

    // Form state
    pub fn set_draft(&self, form_id: String, text: String) -> Result<(), JsValue> {
        self.core.set_draft(parse_form(&form_id)?, text);
        Ok(())
    }
    pub fn toggle_form(&self, form_id: String) -> Result<bool, JsValue> { Ok(self.core.toggle_form(parse_form(&form_id)?)) }
    pub fn set_form_visible(&self, form_id: String, visible: bool) -> Result<(), JsValue> {
        self.core.set_form_visible(parse_form(&form_id)?, visible);
        Ok(())
    }
    pub fn draft(&self, form_id: String) -> Result<String, JsValue> { Ok(self.core.form(parse_form(&form_id)?).draft) }

    // Rendering
    pub fn view_json(&self) -> String {
        serde_json::to_string(&self.core.view()).unwrap_or_else(|_| "{}".to_string())
    }
    pub fn to_html(&self) -> String { self.core.to_html() }
    pub fn drain_events(&self) -> String {
        serde_json::to_string(&self.core.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }
    pub fn comment_count(&self) -> u32 { u32::try_from(self.core.comments().len()).unwrap_or(u32::MAX) }

    // Mutations: each returns a Promise resolving to `true`, or rejecting
    // with the failure message after the error notification is queued.
    pub fn submit(&self, form_id: String) -> Result<Promise, JsValue> {
        let form = parse_form(&form_id)?;
        let (core, transport) = (Rc::clone(&self.core), Rc::clone(&self.transport));
        Ok(future_to_promise(async move {
            core.submit(&*transport, form).await.map(|()| JsValue::TRUE).map_err(|e| {
                warn!(%form, error = %e, "submit failed");
                to_js(e)
            })
        }))
    }

    pub fn delete_comment(&self, comment_id: f64) -> Result<Promise, JsValue> {
        let id = comment_id_from_js(comment_id)?;
        let (core, transport) = (Rc::clone(&self.core), Rc::clone(&self.transport));
        Ok(future_to_promise(async move {
            core.delete(&*transport, id).await.map(|()| JsValue::TRUE).map_err(to_js)
        }))
    }
}
