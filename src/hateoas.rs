//! Hyperlink bundles for paginated views and the query-string templater
//! that builds them.

use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::form_urlencoded;

/// A set of named relation links attached to a resource or collection view.
///
/// Absent relations are omitted from the serialized form entirely, never
/// rendered as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl Hyperlink {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON shape of a hyperlink bundle, for embedding in view schemas.
    pub fn schema() -> Schema {
        Schema::object(
            "Hyperlink",
            "Hyperlink",
            json!({
                "type": "object",
                "properties": {
                    "self": { "type": "string" },
                    "next": { "type": "string" },
                    "previous": { "type": "string" },
                    "current": { "type": "string" },
                    "about": { "type": "string" }
                }
            }),
        )
    }
}

/// Build a URL from a base path, a set of candidate query pairs and an
/// allow-list of recognized keys.
///
/// Any query string already on the base path is kept; allowed, non-empty
/// pairs are merged in with new values overriding existing ones for the same
/// key. Keys off the allow-list, or with empty values, are dropped. Pair
/// order is existing-first, then new keys in the order given.
pub fn url_with_query(path: &str, pairs: &[(&str, String)], allowed: &[&str]) -> String {
    let (base, existing_query) = match path.split_once('?') {
        Some((base, query)) => (base, query),
        None => (path, ""),
    };

    let mut merged: Vec<(String, String)> = form_urlencoded::parse(existing_query.as_bytes())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for (key, value) in pairs {
        if !allowed.contains(key) || value.is_empty() {
            continue;
        }
        match merged.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((key.to_string(), value.clone())),
        }
    }

    if merged.is_empty() {
        return base.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(merged)
        .finish();
    format!("{base}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_filters_and_merges() {
        let url = url_with_query(
            "/greeting?sort=asc",
            &[
                ("page", "2".to_string()),
                ("page_size", "3".to_string()),
                ("other", "x".to_string()),
            ],
            &["page", "page_size"],
        );
        assert_eq!(url, "/greeting?sort=asc&page=2&page_size=3");
        assert!(!url.contains("other"));
    }

    #[test]
    fn test_new_value_overrides_existing_key() {
        let url = url_with_query(
            "/greeting?page=1",
            &[("page", "4".to_string())],
            &["page"],
        );
        assert_eq!(url, "/greeting?page=4");
    }

    #[test]
    fn test_empty_values_dropped() {
        let url = url_with_query("/greeting", &[("page", String::new())], &["page"]);
        assert_eq!(url, "/greeting");
    }

    #[test]
    fn test_absent_links_omitted_from_json() {
        let links = Hyperlink {
            self_link: Some("/greeting?page=1".to_string()),
            ..Hyperlink::new()
        };
        let value = serde_json::to_value(&links).unwrap();
        assert_eq!(value, json!({ "self": "/greeting?page=1" }));
    }
}
