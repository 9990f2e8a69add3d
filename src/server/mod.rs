pub mod request;
pub mod response;
pub mod service;
pub mod http_server;

pub use request::{coerce_declared_params, parse_request, ParamCoerceError, ParsedRequest};

pub use service::{health_endpoint, AppService};
pub use http_server::{HttpServer, ServerHandle};
