//! Single-greeting endpoint: `GET /greetings/{greeting_id}`.

use crate::store::GreetingStore;
use crate::types::{entity_schema, GreetingEntitySummary};
use apiforge::descriptor::ParamType;
use apiforge::document::Endpoint;
use apiforge::operation::{HandlerResponse, Operation, OperationDoc, OperationRequest};
use apiforge::route::RouteSpec;
use apiforge::ResponseDesc;
use http::Method;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub struct GreetingDetail {
    get_op: Operation,
}

impl GreetingDetail {
    /// The detail route. Exposed so the collection endpoint can forge
    /// `about`/`current` links to individual greetings.
    pub fn route() -> RouteSpec {
        RouteSpec::new(
            "/greetings/{greeting_id}",
            vec![("greeting_id", ParamType::Uuid)],
        )
    }

    pub fn new(store: Arc<GreetingStore>) -> Self {
        let doc = OperationDoc::new(
            "Get a greeting",
            ResponseDesc::new(
                200,
                "A single greeting fetched by its identifier",
                entity_schema(),
            ),
        )
        .tag("greet");

        // SAFETY: the handler owns its store Arc and is free of
        // thread-local state.
        let get_op = unsafe { Operation::coroutine(doc, move |req| Self::get(&store, req)) };
        GreetingDetail { get_op }
    }

    fn get(store: &GreetingStore, req: OperationRequest) -> HandlerResponse {
        let raw = req.path_param("greeting_id").unwrap_or_default();
        let uuid = match Uuid::parse_str(raw) {
            Ok(uuid) => uuid,
            Err(_) => {
                return HandlerResponse::new(404, json!({ "error": "Not Found" }));
            }
        };
        match store.fetch(uuid) {
            Some(record) => HandlerResponse::ok_json(
                serde_json::to_value(GreetingEntitySummary {
                    message: record.text,
                })
                .unwrap_or_default(),
            ),
            None => HandlerResponse::new(404, json!({ "error": "Not Found" })),
        }
    }
}

impl Endpoint for GreetingDetail {
    fn route_spec(&self) -> RouteSpec {
        Self::route()
    }

    fn operation(&self, method: &Method) -> Option<&Operation> {
        if *method == Method::GET {
            Some(&self.get_op)
        } else {
            None
        }
    }
}
