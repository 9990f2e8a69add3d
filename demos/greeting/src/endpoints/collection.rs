//! Greeting collection endpoint: paginated `GET /greetings` and
//! `POST /greetings`.

use super::detail::GreetingDetail;
use crate::store::GreetingStore;
use crate::types::{creation_schema, view_schema, GreetingCreationData, GreetingItem, GreetingView};
use apiforge::descriptor::{Body, ParamType, Parameter, ResponseDesc};
use apiforge::document::Endpoint;
use apiforge::hateoas::Hyperlink;
use apiforge::operation::{HandlerResponse, Operation, OperationDoc, OperationRequest};
use apiforge::pagination::Page;
use apiforge::route::RouteSpec;
use http::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 3;
const PAGE_KEYS: [&str; 2] = ["page", "page_size"];

pub struct GreetingCollection {
    get_op: Operation,
    post_op: Operation,
}

impl GreetingCollection {
    pub fn route() -> RouteSpec {
        RouteSpec::new("/greetings", vec![])
    }

    pub fn new(store: Arc<GreetingStore>) -> Self {
        let get_doc = OperationDoc::new(
            "List greetings",
            ResponseDesc::new(200, "Paginated view of greetings", view_schema()),
        )
        .tag("greet")
        .parameters(vec![
            Parameter::new("page", ParamType::Int, "Page to fetch in the pagination"),
            Parameter::new("page_size", ParamType::Int, "Expected page size"),
        ]);
        let get_store = Arc::clone(&store);
        let get_op = Operation::new(get_doc, move |req| Self::list(&get_store, req));

        let post_doc = OperationDoc::new(
            "Create a greeting",
            ResponseDesc::new(201, "The refreshed first page after creation", view_schema()),
        )
        .tag("greet")
        .body(Body::new(creation_schema()));
        let post_op = Operation::new(post_doc, move |req| Self::create(&store, req));

        GreetingCollection { get_op, post_op }
    }

    fn cursor_from(req: &OperationRequest) -> Page {
        let page = req.query_param("page").and_then(Value::as_i64).unwrap_or(1);
        let page_size = req
            .query_param("page_size")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Page::new(page, page_size)
    }

    fn list(store: &GreetingStore, req: OperationRequest) -> HandlerResponse {
        let cursor = Self::cursor_from(&req);
        if !cursor.is_valid() {
            return HandlerResponse::new(
                400,
                json!({ "error": "page and page_size must be positive" }),
            );
        }
        let view = Self::view(store, cursor);
        HandlerResponse::ok_json(serde_json::to_value(view).unwrap_or_default())
    }

    fn create(store: &GreetingStore, req: OperationRequest) -> HandlerResponse {
        let data: GreetingCreationData = match req.body.and_then(|b| serde_json::from_value(b).ok())
        {
            Some(data) => data,
            None => {
                return HandlerResponse::new(400, json!({ "error": "Invalid request body" }));
            }
        };

        let uuid = store.insert(data.message);
        let mut view = Self::view(store, Page::new(1, DEFAULT_PAGE_SIZE));
        view.links.current = Some(Self::entity_url(uuid));
        HandlerResponse::new(201, serde_json::to_value(view).unwrap_or_default())
    }

    /// Assemble the paginated view with self/next/previous links.
    fn view(store: &GreetingStore, cursor: Page) -> GreetingView {
        let records = store.page(cursor.offset(), cursor.page_size);
        let total_count = store.count();

        let items = records
            .into_iter()
            .map(|record| GreetingItem {
                message: record.text,
                links: Hyperlink {
                    about: Some(Self::entity_url(record.uuid)),
                    ..Hyperlink::new()
                },
            })
            .collect();

        GreetingView {
            page: cursor.page,
            page_size: cursor.page_size,
            total_count,
            items,
            links: Hyperlink {
                self_link: Some(Self::page_url(cursor)),
                previous: cursor.previous(Some(total_count)).map(Self::page_url),
                next: cursor.next(Some(total_count)).map(Self::page_url),
                ..Hyperlink::new()
            },
        }
    }

    fn page_url(cursor: Page) -> String {
        Self::route().url_with_query(
            &[
                ("page", cursor.page.to_string()),
                ("page_size", cursor.page_size.to_string()),
            ],
            &PAGE_KEYS,
        )
    }

    fn entity_url(uuid: Uuid) -> String {
        GreetingDetail::route().build_url(&[("greeting_id", &uuid.to_string())])
    }
}

impl Endpoint for GreetingCollection {
    fn route_spec(&self) -> RouteSpec {
        Self::route()
    }

    fn operation(&self, method: &Method) -> Option<&Operation> {
        if *method == Method::GET {
            Some(&self.get_op)
        } else if *method == Method::POST {
            Some(&self.post_op)
        } else {
            None
        }
    }
}
