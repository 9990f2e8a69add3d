//! The HTTP service: fixed documentation routes plus dispatch into the
//! registered endpoints.
//!
//! The API document is assembled once, in [`AppService::new`], before any
//! request is routable. An assembly failure is returned to the caller so the
//! process never starts serving a wrong or partial document.

use super::request::{coerce_declared_params, parse_request, ParsedRequest};
use super::response::{write_json_error, write_json_response};
use crate::document::{build_document, DocumentError, DocumentInfo, Endpoint};
use crate::operation::OperationRequest;
use crate::static_files::StaticFiles;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use regex::Regex;
use serde_json::json;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

struct CompiledRoute {
    matcher: Regex,
    param_names: Vec<String>,
    endpoint: usize,
}

/// HTTP service over a fixed endpoint set and its prebuilt API document.
#[derive(Clone)]
pub struct AppService {
    endpoints: Arc<Vec<Box<dyn Endpoint>>>,
    routes: Arc<Vec<CompiledRoute>>,
    document: Arc<serde_json::Value>,
    doc_files: Option<StaticFiles>,
}

impl AppService {
    /// Build the document over `endpoints` and compile their route matchers.
    ///
    /// Runs document assembly exactly once; on failure (e.g. a schema title
    /// collision) no service is produced and the caller must abort startup.
    pub fn new(
        info: &DocumentInfo,
        endpoints: Vec<Box<dyn Endpoint>>,
        docs_dir: Option<PathBuf>,
    ) -> Result<Self, DocumentError> {
        let refs: Vec<&dyn Endpoint> = endpoints.iter().map(|e| e.as_ref()).collect();
        let document = build_document(info, &refs)?;

        let routes = endpoints
            .iter()
            .enumerate()
            .map(|(endpoint, e)| {
                let route = e.route_spec();
                CompiledRoute {
                    matcher: route.to_regex(),
                    param_names: route
                        .params()
                        .iter()
                        .map(|(name, _)| name.clone())
                        .collect(),
                    endpoint,
                }
            })
            .collect();

        info!(endpoints = endpoints.len(), "service assembled");

        Ok(AppService {
            endpoints: Arc::new(endpoints),
            routes: Arc::new(routes),
            document: Arc::new(document),
            doc_files: docs_dir.map(StaticFiles::new),
        })
    }

    /// The assembled API document served at `/openapi.json`.
    pub fn document(&self) -> &serde_json::Value {
        &self.document
    }

    fn dispatch(&self, parsed: ParsedRequest, res: &mut Response) {
        let method: Method = match parsed.method.parse() {
            Ok(m) => m,
            Err(_) => {
                write_json_error(res, 405, json!({ "error": "Method Not Allowed" }));
                return;
            }
        };

        for route in self.routes.iter() {
            let captures = match route.matcher.captures(&parsed.path) {
                Some(c) => c,
                None => continue,
            };
            let endpoint = &self.endpoints[route.endpoint];

            let operation = match endpoint.operation(&method) {
                Some(op) => op,
                None => {
                    write_json_error(
                        res,
                        405,
                        json!({ "error": "Method Not Allowed", "method": parsed.method, "path": parsed.path }),
                    );
                    return;
                }
            };

            // Path captures stay raw; the handler owns their parsing and
            // the status for a malformed value.
            let mut path_params = HashMap::with_capacity(route.param_names.len());
            for (i, name) in route.param_names.iter().enumerate() {
                if let Some(val) = captures.get(i + 1) {
                    path_params.insert(name.clone(), val.as_str().to_string());
                }
            }

            let query_params =
                match coerce_declared_params(operation.declared_params(), &parsed.query_params) {
                    Ok(coerced) => coerced,
                    Err(err) => {
                        warn!(parameter = %err.name, "query parameter failed coercion");
                        write_json_error(
                            res,
                            400,
                            json!({ "error": err.to_string(), "parameter": err.name }),
                        );
                        return;
                    }
                };

            let response = operation.invoke(OperationRequest {
                path_params,
                query_params,
                body: parsed.body,
            });
            write_json_response(res, response.status, &response.body);
            return;
        }

        write_json_error(
            res,
            404,
            json!({ "error": "Not Found", "method": parsed.method, "path": parsed.path }),
        );
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_json_response(res, 200, &json!({ "status": "ok" }));
    Ok(())
}

fn docs_endpoint(res: &mut Response, docs: &StaticFiles, file: &str) -> io::Result<()> {
    let ctx = json!({ "spec_url": "/openapi.json" });
    let ctx = if file == "index.html" { Some(&ctx) } else { None };
    match docs.load(file, ctx) {
        Ok((bytes, content_type)) => {
            res.status_code(200, "OK");
            res.header(StaticFiles::content_type_header(content_type));
            res.body_vec(bytes);
        }
        Err(_) => {
            write_json_error(res, 404, json!({ "error": "Docs not found" }));
        }
    }
    Ok(())
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);

        if parsed.method == "GET" && parsed.path == "/health" {
            return health_endpoint(res);
        }
        if parsed.method == "GET" && parsed.path == "/openapi.json" {
            write_json_response(res, 200, &self.document);
            return Ok(());
        }
        if parsed.method == "GET" && (parsed.path == "/docs" || parsed.path.starts_with("/docs/")) {
            if let Some(docs) = &self.doc_files {
                let file = parsed.path.trim_start_matches("/docs").trim_start_matches('/');
                let file = if file.is_empty() { "index.html" } else { file };
                return docs_endpoint(res, docs, file);
            }
            write_json_error(res, 404, json!({ "error": "Docs not configured" }));
            return Ok(());
        }

        self.dispatch(parsed, res);
        Ok(())
    }
}
