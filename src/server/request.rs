//! Raw HTTP request parsing and declared-parameter coercion.

use crate::descriptor::{CoerceError, Parameter};
use may_minihttp::Request;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, ...)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// Parsed query string parameters, raw strings
    pub query_params: HashMap<String, String>,
    /// Parsed JSON body, if any
    pub body: Option<Value>,
}

/// Parse query string parameters out of a request path.
pub fn parse_query_params(path: &str) -> HashMap<String, String> {
    match path.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        None => HashMap::new(),
    }
}

/// Extract method, path, query parameters and JSON body from a raw
/// `may_minihttp` request.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();
    let query_params = parse_query_params(&raw_path);

    let body = {
        let mut body_str = String::new();
        match req.body().read_to_string(&mut body_str) {
            Ok(size) if size > 0 => serde_json::from_str(&body_str).ok(),
            _ => None,
        }
    };

    debug!(
        method = %method,
        path = %path,
        query_count = query_params.len(),
        has_body = body.is_some(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        query_params,
        body,
    }
}

/// A declared query parameter whose supplied value failed coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamCoerceError {
    pub name: String,
    pub source: CoerceError,
}

impl std::fmt::Display for ParamCoerceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "query parameter '{}': {}", self.name, self.source)
    }
}

impl std::error::Error for ParamCoerceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Coerce the declared query parameters that are present in the request.
///
/// Absent declared parameters are simply omitted (handlers apply their own
/// defaults); undeclared query keys are ignored. A malformed value is a
/// client error, reported with the offending parameter's name.
pub fn coerce_declared_params(
    declared: &[Parameter],
    query_params: &HashMap<String, String>,
) -> Result<HashMap<String, Value>, ParamCoerceError> {
    let mut coerced = HashMap::new();
    for param in declared {
        if let Some(raw) = query_params.get(&param.name) {
            let value = param.schema.coerce(raw).map_err(|source| ParamCoerceError {
                name: param.name.clone(),
                source,
            })?;
            coerced.insert(param.name.clone(), value);
        }
    }
    Ok(coerced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ParamType;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/greetings?page=2&page_size=3");
        assert_eq!(q.get("page"), Some(&"2".to_string()));
        assert_eq!(q.get("page_size"), Some(&"3".to_string()));
        assert!(parse_query_params("/greetings").is_empty());
    }

    #[test]
    fn test_coerce_declared_params() {
        let declared = vec![Parameter::new("page", ParamType::Int, "page to fetch")];
        let mut query = HashMap::new();
        query.insert("page".to_string(), "2".to_string());
        query.insert("sort".to_string(), "asc".to_string());

        let coerced = coerce_declared_params(&declared, &query).unwrap();
        assert_eq!(coerced.get("page"), Some(&serde_json::json!(2)));
        // Undeclared keys pass the coercion step untouched.
        assert!(!coerced.contains_key("sort"));
    }

    #[test]
    fn test_malformed_declared_param_is_client_error() {
        let declared = vec![Parameter::new("page", ParamType::Int, "page to fetch")];
        let mut query = HashMap::new();
        query.insert("page".to_string(), "two".to_string());

        let err = coerce_declared_params(&declared, &query).unwrap_err();
        assert_eq!(err.name, "page");
    }

    #[test]
    fn test_absent_declared_param_is_omitted() {
        let declared = vec![Parameter::new("page", ParamType::Int, "page to fetch")];
        let coerced = coerce_declared_params(&declared, &HashMap::new()).unwrap();
        assert!(coerced.is_empty());
    }
}
