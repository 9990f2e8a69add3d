//! # apiforge
//!
//! Declarative OpenAPI metadata capture and document synthesis for coroutine
//! HTTP services built on [`may_minihttp`].
//!
//! Endpoint handlers declare their contract (summary, tags, query
//! parameters, request body and response shapes) next to their
//! implementation. At process startup the whole endpoint set is walked once
//! and compiled into a single validated OpenAPI 3.0.3 document, served at
//! `/openapi.json`; per-request handling then only coerces declared scalar
//! parameters and never touches document state again.
//!
//! ## Modules
//!
//! - **[`descriptor`]** - scalar parameter types, query parameter, body and
//!   response descriptors
//! - **[`operation`]** - the per-operation metadata record and the capture
//!   wrapper with its one-shot dispose lifecycle
//! - **[`schema`]** - named JSON shapes, de-duplicated into
//!   `components.schemas` with fatal title-collision checking
//! - **[`route`]** - dual-mode routes: one `{name}` template for
//!   registration and documentation, one concrete-URL builder for hyperlinks
//! - **[`document`]** - the one-shot document assembler
//! - **[`pagination`]** - 1-based page cursor arithmetic for list views
//! - **[`hateoas`]** - relation-link bundles and the allow-listed
//!   query-string templater behind them
//! - **[`server`]** - the `may_minihttp` serving layer: request parsing,
//!   declared-parameter coercion, endpoint dispatch and fixed routes
//!   (`/openapi.json`, `/health`, `/docs`)
//! - **[`static_files`]** - documentation viewer assets
//! - **[`runtime_config`]** - coroutine stack sizing from the environment
//!
//! ## Lifecycle
//!
//! Declaration happens once, at startup: each endpoint constructs its
//! [`operation::Operation`]s with their [`operation::OperationDoc`]s
//! attached. [`document::build_document`] (run by
//! [`server::AppService::new`]) reads every record, emits the document and
//! disposes each record exactly once. Metadata access after disposal is a
//! programming error and panics; invocation is untouched and stays valid for
//! the life of the process.

pub mod descriptor;
pub mod document;
pub mod hateoas;
pub mod operation;
pub mod pagination;
pub mod route;
pub mod runtime_config;
pub mod schema;
pub mod server;
pub mod static_files;

pub use descriptor::{Body, CoerceError, ParamType, Parameter, ResponseDesc, UnknownParamType};
pub use document::{build_document, documented_methods, DocumentError, DocumentInfo, Endpoint};
pub use hateoas::{url_with_query, Hyperlink};
pub use operation::{HandlerResponse, Operation, OperationDoc, OperationRequest};
pub use pagination::Page;
pub use route::RouteSpec;
pub use schema::{Schema, SchemaConflict, SchemaRegistry};
