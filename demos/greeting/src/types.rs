//! Payload types of the greeting service and their declared JSON shapes.

use apiforge::hateoas::Hyperlink;
use apiforge::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingCreationData {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingItem {
    pub message: Option<String>,
    pub links: Hyperlink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingView {
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub items: Vec<GreetingItem>,
    pub links: Hyperlink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingEntitySummary {
    pub message: Option<String>,
}

pub fn creation_schema() -> Schema {
    Schema::object(
        "GreetingCreationData",
        "GreetingCreationData",
        json!({
            "type": "object",
            "properties": {
                "message": { "type": "string" }
            }
        }),
    )
}

pub fn view_schema() -> Schema {
    let links = Hyperlink::schema().definition;
    Schema::object(
        "GreetingView",
        "GreetingView",
        json!({
            "type": "object",
            "properties": {
                "page": { "type": "integer" },
                "page_size": { "type": "integer" },
                "total_count": { "type": "integer" },
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "links": links.clone()
                        }
                    }
                },
                "links": links
            }
        }),
    )
}

pub fn entity_schema() -> Schema {
    Schema::object(
        "GreetingEntitySummary",
        "GreetingEntitySummary",
        json!({
            "type": "object",
            "properties": {
                "message": { "type": "string" }
            }
        }),
    )
}
