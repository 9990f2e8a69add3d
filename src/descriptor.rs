//! Value objects attached to a single operation: scalar parameter types,
//! query parameters, request bodies and documented responses.

use crate::schema::Schema;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Scalar type tag for a declared parameter.
///
/// This is the complete set the document assembler knows how to render;
/// extending it means extending [`ParamType::json_schema`] and
/// [`ParamType::coerce`] together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Int,
    Uuid,
}

impl ParamType {
    /// Fixed mapping from scalar tag to its JSON shape in the document.
    pub fn json_schema(&self) -> Value {
        match self {
            ParamType::Int => json!({ "type": "integer" }),
            ParamType::Uuid => json!({ "type": "string", "format": "uuid" }),
        }
    }

    /// Convert a raw query/path string into a typed JSON value.
    ///
    /// Malformed input is a client error, not a fault: the serving layer
    /// answers 400 with the offending parameter name.
    pub fn coerce(&self, raw: &str) -> Result<Value, CoerceError> {
        match self {
            ParamType::Int => raw
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| CoerceError::new(*self, raw)),
            ParamType::Uuid => Uuid::parse_str(raw)
                .map(|u| Value::String(u.to_string()))
                .map_err(|_| CoerceError::new(*self, raw)),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Int => write!(f, "int"),
            ParamType::Uuid => write!(f, "uuid"),
        }
    }
}

impl FromStr for ParamType {
    type Err = UnknownParamType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ParamType::Int),
            "uuid" => Ok(ParamType::Uuid),
            other => Err(UnknownParamType(other.to_string())),
        }
    }
}

/// A scalar tag string that is not part of the recognized set.
///
/// Inside the crate the closed [`ParamType`] enum makes this state
/// unrepresentable; it can only arise at an authoring boundary where the
/// tag comes in as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParamType(pub String);

impl fmt::Display for UnknownParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scalar parameter type '{}'", self.0)
    }
}

impl std::error::Error for UnknownParamType {}

/// A raw value that failed conversion to its declared scalar type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoerceError {
    pub expected: ParamType,
    pub raw: String,
}

impl CoerceError {
    fn new(expected: ParamType, raw: &str) -> Self {
        CoerceError {
            expected,
            raw: raw.to_string(),
        }
    }
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value '{}' is not a valid {}", self.raw, self.expected)
    }
}

impl std::error::Error for CoerceError {}

/// One declared query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub schema: ParamType,
}

impl Parameter {
    pub fn new(name: &str, schema: ParamType, description: &str) -> Self {
        Parameter {
            name: name.to_string(),
            description: description.to_string(),
            schema,
        }
    }
}

/// The single documented response of an operation.
///
/// Exactly one per operation. Modeling several status codes would turn this
/// into a list and change the assembler's single-entry `responses` emit.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDesc {
    pub status: u16,
    pub description: String,
    pub schema: Schema,
}

impl ResponseDesc {
    pub fn new(status: u16, description: &str, schema: Schema) -> Self {
        ResponseDesc {
            status,
            description: description.to_string(),
            schema,
        }
    }
}

/// The declared request body of an operation, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub schema: Schema,
}

impl Body {
    pub fn new(schema: Schema) -> Self {
        Body { schema }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_mapping() {
        assert_eq!(ParamType::Int.json_schema(), json!({ "type": "integer" }));
        assert_eq!(
            ParamType::Uuid.json_schema(),
            json!({ "type": "string", "format": "uuid" })
        );
    }

    #[test]
    fn test_from_str_rejects_unknown_tag() {
        assert_eq!("int".parse::<ParamType>(), Ok(ParamType::Int));
        assert_eq!("uuid".parse::<ParamType>(), Ok(ParamType::Uuid));
        assert!("datetime".parse::<ParamType>().is_err());
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(ParamType::Int.coerce("42").unwrap(), json!(42));
        assert!(ParamType::Int.coerce("forty-two").is_err());
    }

    #[test]
    fn test_coerce_uuid() {
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(ParamType::Uuid.coerce(id).unwrap(), json!(id));
        assert!(ParamType::Uuid.coerce("not-a-uuid").is_err());
    }
}
