//! Greeting demo service.
//!
//! A small self-documenting HTTP service: an in-memory greeting store, a
//! paginated collection endpoint with HATEOAS links and a detail endpoint,
//! all declaring their OpenAPI metadata next to their handlers.

pub mod endpoints;
pub mod store;
pub mod types;

use apiforge::document::{DocumentInfo, Endpoint};
use apiforge::server::AppService;
use endpoints::{GreetingCollection, GreetingDetail};
use std::path::PathBuf;
use std::sync::Arc;
use store::GreetingStore;

/// Wire the whole service: store, endpoints, document assembly.
///
/// Fails when document assembly fails, in which case the process must not
/// start serving.
pub fn build_service(
    store: Arc<GreetingStore>,
    docs_dir: Option<PathBuf>,
) -> Result<AppService, apiforge::DocumentError> {
    let info = DocumentInfo::new("Greeting API", "1.0.0");
    let endpoints: Vec<Box<dyn Endpoint>> = vec![
        Box::new(GreetingCollection::new(Arc::clone(&store))),
        Box::new(GreetingDetail::new(store)),
    ];
    AppService::new(&info, endpoints, docs_dir)
}
