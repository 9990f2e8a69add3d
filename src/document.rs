//! Document assembly: walk every registered endpoint once, at startup, and
//! synthesize the OpenAPI description served at `/openapi.json`.
//!
//! Assembly is single-threaded and runs exactly once per process lifetime,
//! strictly before serving begins. Each operation's metadata is read, emitted
//! and then disposed; a failure here must keep the process from starting.

use crate::operation::Operation;
use crate::route::RouteSpec;
use crate::schema::{SchemaConflict, SchemaRegistry};
use http::Method;
use serde_json::{json, Map, Value};
use std::fmt;
use tracing::info;

/// Identity of the produced document, passed in explicitly by whatever wires
/// the process together.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub version: String,
}

impl DocumentInfo {
    pub fn new(title: &str, version: &str) -> Self {
        DocumentInfo {
            title: title.to_string(),
            version: version.to_string(),
        }
    }
}

/// One registered HTTP endpoint: a route plus an operation per supported
/// verb.
pub trait Endpoint: Send + Sync {
    fn route_spec(&self) -> RouteSpec;
    /// The operation attached to `method`, if this endpoint supports it.
    fn operation(&self, method: &Method) -> Option<&Operation>;
}

/// The fixed, ordered verb set the assembler walks per endpoint.
pub fn documented_methods() -> [Method; 2] {
    [Method::GET, Method::POST]
}

/// Fatal assembly failures. The caller must not start serving on any of
/// these.
#[derive(Debug)]
pub enum DocumentError {
    Schema(SchemaConflict),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Schema(conflict) => {
                write!(f, "document assembly failed: {conflict}")
            }
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Schema(conflict) => Some(conflict),
        }
    }
}

impl From<SchemaConflict> for DocumentError {
    fn from(conflict: SchemaConflict) -> Self {
        DocumentError::Schema(conflict)
    }
}

/// Assemble the full document from the registered endpoint set.
///
/// First pass collects every body and response schema endpoint-wide into the
/// registry, so a title collision aborts before any path is emitted. Second
/// pass emits one path item per endpoint in registration order, one operation
/// per supported verb, and disposes each operation's metadata immediately
/// after that operation has been fully emitted.
pub fn build_document(
    info: &DocumentInfo,
    endpoints: &[&dyn Endpoint],
) -> Result<Value, DocumentError> {
    let mut registry = SchemaRegistry::new();
    for endpoint in endpoints {
        for method in documented_methods() {
            if let Some(operation) = endpoint.operation(&method) {
                let doc = operation.doc();
                if let Some(body) = &doc.body {
                    registry.insert(&body.schema)?;
                }
                registry.insert(&doc.response.schema)?;
            }
        }
    }

    let mut paths = Map::new();
    for endpoint in endpoints {
        let route = endpoint.route_spec();
        let mut path_item = Map::new();

        for method in documented_methods() {
            if let Some(operation) = endpoint.operation(&method) {
                let rendered = render_operation(operation, &registry);
                path_item.insert(method.as_str().to_ascii_lowercase(), rendered);
                operation.dispose();
            }
        }

        if !route.params().is_empty() {
            let path_params: Vec<Value> = route
                .params()
                .iter()
                .map(|(name, ty)| {
                    json!({
                        "in": "path",
                        "name": name,
                        "required": true,
                        "schema": ty.json_schema()
                    })
                })
                .collect();
            path_item.insert("parameters".to_string(), Value::Array(path_params));
        }

        paths.insert(route.template().to_string(), Value::Object(path_item));
    }

    info!(
        paths = paths.len(),
        schemas = registry.len(),
        title = %info.title,
        "API document assembled"
    );

    Ok(json!({
        "openapi": "3.0.3",
        "info": { "title": info.title, "version": info.version },
        "paths": paths,
        "components": { "schemas": registry.into_components() }
    }))
}

fn render_operation(operation: &Operation, registry: &SchemaRegistry) -> Value {
    let doc = operation.doc();
    let mut rendered = Map::new();
    rendered.insert("summary".to_string(), Value::String(doc.summary.clone()));

    if let Some(tag) = &doc.tag {
        rendered.insert("tags".to_string(), json!([tag]));
    }

    if !doc.parameters.is_empty() {
        let parameters: Vec<Value> = doc
            .parameters
            .iter()
            .map(|param| {
                json!({
                    "in": "query",
                    "name": param.name,
                    "description": param.description,
                    "schema": param.schema.json_schema()
                })
            })
            .collect();
        rendered.insert("parameters".to_string(), Value::Array(parameters));
    }

    if let Some(body) = &doc.body {
        let schema_ref = registry
            .ref_for(&body.schema.title)
            .expect("body schema collected in first pass");
        rendered.insert(
            "requestBody".to_string(),
            json!({
                "required": true,
                "content": {
                    "application/json": { "schema": { "$ref": schema_ref } }
                }
            }),
        );
    }

    let response_ref = registry
        .ref_for(&doc.response.schema.title)
        .expect("response schema collected in first pass");
    rendered.insert(
        "responses".to_string(),
        json!({
            doc.response.status.to_string(): {
                "description": doc.response.description,
                "content": {
                    "application/json": { "schema": { "$ref": response_ref } }
                }
            }
        }),
    );

    Value::Object(rendered)
}
