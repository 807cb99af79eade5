//! OpenAPI 3.1 document types, limited to the subset the synthesizer emits.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// OpenAPI revision written into every compiled document. 3.1 is the first
/// revision in which an operation without `responses` is schema-valid, which
/// synthesized operations rely on.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// A compiled OpenAPI document.
///
/// `info` is an open map: `title` and `version` are always present, and any
/// extra keys supplied by the application are carried through as-is. `paths`
/// preserves first-registration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSpec {
    pub openapi: String,
    pub info: IndexMap<String, Value>,
    pub paths: IndexMap<String, PathItem>,
}

/// All operations sharing one route pattern, plus the path parameters
/// derived from that pattern.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Lower-case verb key per declared method, in first-registration order.
    #[serde(flatten)]
    pub operations: IndexMap<String, Operation>,
}

/// A single `{name}` placeholder in a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl Parameter {
    /// A required path parameter, the only kind derived from route patterns.
    pub fn path(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            location: ParameterLocation::Path,
            required: true,
        }
    }
}

/// The documented behavior of one HTTP method on one route pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "requestBody")]
    pub request_body: RequestBody,
}

/// Accepted request content, one entry per MIME type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
    /// The wildcard body used when no accept constraint applies.
    pub fn permissive() -> Self {
        let mut content = IndexMap::new();
        content.insert("*/*".to_string(), MediaType::permissive());
        RequestBody {
            description: None,
            content,
        }
    }
}

/// Media-type entry carrying a permissive placeholder schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Value,
}

impl MediaType {
    /// An empty schema, which accepts any value.
    pub fn permissive() -> Self {
        MediaType {
            schema: Value::Object(serde_json::Map::new()),
        }
    }
}
