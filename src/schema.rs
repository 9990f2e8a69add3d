//! Named JSON shapes and the registry that de-duplicates them into
//! `components.schemas`.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// A named, structural description of a JSON payload shape.
///
/// `ident` is the stable component identifier (by convention the Rust type
/// name); `title` is the author-controlled display name embedded in the
/// definition. Two schemas may share an ident only if their definitions are
/// equal; two schemas may never share a title.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub ident: String,
    pub title: String,
    pub definition: Value,
}

impl Schema {
    /// Build a schema whose definition carries its title, the way the
    /// document presents it.
    pub fn object(ident: &str, title: &str, definition: Value) -> Self {
        let mut definition = definition;
        if let Value::Object(obj) = &mut definition {
            obj.insert("title".to_string(), Value::String(title.to_string()));
        }
        Schema {
            ident: ident.to_string(),
            title: title.to_string(),
            definition,
        }
    }
}

/// Collects every schema referenced by any operation and assigns each a
/// stable component identifier.
///
/// Filled during document assembly, immutable afterward.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    definitions: BTreeMap<String, Value>,
    ident_by_title: HashMap<String, String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema, de-duplicating by identifier.
    ///
    /// Inserting the same schema twice is a no-op. A title shared by two
    /// structurally different schemas is a [`SchemaConflict`]: titles are the
    /// only author-controlled external name, so a collision would document
    /// two different payloads under one name.
    pub fn insert(&mut self, schema: &Schema) -> Result<(), SchemaConflict> {
        if let Some(existing_ident) = self.ident_by_title.get(&schema.title) {
            if *existing_ident != schema.ident {
                return Err(SchemaConflict::TitleCollision {
                    title: schema.title.clone(),
                    first: existing_ident.clone(),
                    second: schema.ident.clone(),
                });
            }
        }
        if let Some(existing) = self.definitions.get(&schema.ident) {
            if *existing != schema.definition {
                return Err(SchemaConflict::IdentRedefined {
                    ident: schema.ident.clone(),
                });
            }
            return Ok(());
        }
        self.definitions
            .insert(schema.ident.clone(), schema.definition.clone());
        self.ident_by_title
            .insert(schema.title.clone(), schema.ident.clone());
        Ok(())
    }

    /// `$ref` string for a registered title.
    pub fn ref_for(&self, title: &str) -> Option<String> {
        self.ident_by_title
            .get(title)
            .map(|ident| format!("#/components/schemas/{ident}"))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Emit the `components.schemas` object, keyed by identifier.
    pub fn into_components(self) -> Value {
        let mut components = Map::new();
        for (ident, definition) in self.definitions {
            components.insert(ident, definition);
        }
        Value::Object(components)
    }
}

/// Fatal registry conflicts; document assembly must abort on either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaConflict {
    /// Two structurally different schemas declared the same title.
    TitleCollision {
        title: String,
        first: String,
        second: String,
    },
    /// One identifier was registered twice with different definitions.
    IdentRedefined { ident: String },
}

impl std::fmt::Display for SchemaConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaConflict::TitleCollision {
                title,
                first,
                second,
            } => write!(
                f,
                "schema title '{title}' is shared by '{first}' and '{second}'; titles must be unique"
            ),
            SchemaConflict::IdentRedefined { ident } => {
                write!(f, "schema '{ident}' registered twice with different definitions")
            }
        }
    }
}

impl std::error::Error for SchemaConflict {}
