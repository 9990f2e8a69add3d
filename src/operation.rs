//! Operation metadata records and the capture wrapper that attaches one to
//! a handler.
//!
//! An [`Operation`] couples a handler with its [`OperationDoc`]. The document
//! assembler reads the metadata any number of times, emits the operation into
//! the document, then calls [`Operation::dispose`] exactly once. Invocation
//! remains valid forever; only metadata access is invalidated. Reading after
//! dispose, or disposing twice, is an assembler-ordering bug and panics.

use crate::descriptor::{Body, Parameter, ResponseDesc};
use may::coroutine;
use may::sync::mpsc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::error;

/// The request shape handed to an operation handler after routing and
/// declared-parameter coercion.
///
/// Coercion applies to query parameters only. Path captures arrive as raw
/// strings: the placeholder's scalar type shapes the document, and parsing
/// the value (answering 404 or similar when it is malformed) is the
/// handler's job.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    /// Values captured from the path template, raw strings.
    pub path_params: HashMap<String, String>,
    /// Declared query parameters, already coerced to their scalar type.
    pub query_params: HashMap<String, Value>,
    /// Parsed JSON body, if the request carried one.
    pub body: Option<Value>,
}

impl OperationRequest {
    pub fn new() -> Self {
        OperationRequest {
            path_params: HashMap::new(),
            query_params: HashMap::new(),
            body: None,
        }
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&Value> {
        self.query_params.get(name)
    }
}

impl Default for OperationRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    pub fn new(status: u16, body: Value) -> Self {
        HandlerResponse { status, body }
    }

    pub fn ok_json(body: Value) -> Self {
        HandlerResponse { status: 200, body }
    }
}

/// The full documentation contract of one (endpoint, verb) pair.
///
/// Immutable once constructed; consumed by document assembly.
#[derive(Debug, Clone)]
pub struct OperationDoc {
    pub summary: String,
    pub tag: Option<String>,
    pub parameters: Vec<Parameter>,
    pub body: Option<Body>,
    pub response: ResponseDesc,
}

impl OperationDoc {
    pub fn new(summary: &str, response: ResponseDesc) -> Self {
        OperationDoc {
            summary: summary.to_string(),
            tag: None,
            parameters: Vec::new(),
            body: None,
            response,
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }
}

struct CoroutineCall {
    request: OperationRequest,
    reply_tx: mpsc::Sender<HandlerResponse>,
}

enum HandlerSlot {
    /// Direct call on the serving coroutine.
    Sync(Box<dyn Fn(OperationRequest) -> HandlerResponse + Send + Sync>),
    /// Dedicated handler coroutine fed through a channel; `invoke` parks the
    /// caller on a per-call reply channel.
    Coroutine(mpsc::Sender<CoroutineCall>),
}

/// A handler wrapped together with its introspectable metadata.
///
/// Constructed once per declared operation at startup and stored by the
/// owning endpoint. Two calling conventions satisfy the same contract
/// (invoke, introspect, dispose): [`Operation::new`] for plain synchronous
/// handlers and [`Operation::coroutine`] for handlers that should run on
/// their own `may` coroutine.
pub struct Operation {
    doc: Mutex<Option<OperationDoc>>,
    /// Declared query parameters, captured at construction for per-request
    /// coercion. Retained across dispose: request handling keeps coercing
    /// long after the document consumed the full metadata record.
    coercions: Vec<Parameter>,
    handler: HandlerSlot,
}

impl Operation {
    /// Wrap a synchronous handler.
    pub fn new<F>(doc: OperationDoc, handler: F) -> Self
    where
        F: Fn(OperationRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        Operation {
            coercions: doc.parameters.clone(),
            doc: Mutex::new(Some(doc)),
            handler: HandlerSlot::Sync(Box::new(handler)),
        }
    }

    /// Wrap a handler running on its own coroutine.
    ///
    /// # Safety
    ///
    /// Spawns a `may` coroutine (inherently unsafe in the may runtime). The
    /// caller must ensure the handler does not rely on thread-local state
    /// and is safe to run concurrently with the serving coroutines. Handler
    /// panics are caught and surfaced as a 500 response.
    pub unsafe fn coroutine<F>(doc: OperationDoc, handler: F) -> Self
    where
        F: Fn(OperationRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel::<CoroutineCall>();
        coroutine::spawn(move || {
            for call in rx.iter() {
                let reply_tx = call.reply_tx;
                let request = call.request;
                match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(request))) {
                    Ok(response) => {
                        let _ = reply_tx.send(response);
                    }
                    Err(panic) => {
                        error!(?panic, "operation handler panicked");
                        let _ = reply_tx.send(HandlerResponse::new(
                            500,
                            serde_json::json!({ "error": "Handler panicked" }),
                        ));
                    }
                }
            }
        });
        Operation {
            coercions: doc.parameters.clone(),
            doc: Mutex::new(Some(doc)),
            handler: HandlerSlot::Coroutine(tx),
        }
    }

    /// Invoke the wrapped handler. Valid before and after [`dispose`].
    ///
    /// [`dispose`]: Operation::dispose
    pub fn invoke(&self, request: OperationRequest) -> HandlerResponse {
        match &self.handler {
            HandlerSlot::Sync(f) => f(request),
            HandlerSlot::Coroutine(tx) => {
                let (reply_tx, reply_rx) = mpsc::channel();
                if tx.send(CoroutineCall { request, reply_tx }).is_err() {
                    return HandlerResponse::new(
                        500,
                        serde_json::json!({ "error": "Handler coroutine gone" }),
                    );
                }
                reply_rx.recv().unwrap_or_else(|_| {
                    HandlerResponse::new(
                        500,
                        serde_json::json!({ "error": "Handler dropped the reply channel" }),
                    )
                })
            }
        }
    }

    /// Read the operation metadata.
    ///
    /// # Panics
    ///
    /// Panics if called after [`Operation::dispose`]; a post-dispose read is
    /// a reuse-ordering bug in the assembler, never a runtime condition.
    pub fn doc(&self) -> OperationDoc {
        self.doc
            .lock()
            .unwrap()
            .clone()
            .expect("operation metadata read after dispose")
    }

    /// Whether the metadata is still attached.
    pub fn has_doc(&self) -> bool {
        self.doc.lock().unwrap().is_some()
    }

    /// The declared query parameters used for per-request coercion.
    /// Available before and after dispose.
    pub fn declared_params(&self) -> &[Parameter] {
        &self.coercions
    }

    /// Permanently drop the metadata. One-shot.
    ///
    /// # Panics
    ///
    /// Panics on the second call: the assembler disposes each operation
    /// exactly once, after its last read.
    pub fn dispose(&self) {
        let disposed = self.doc.lock().unwrap().take();
        assert!(disposed.is_some(), "operation metadata disposed twice");
    }
}
