//! OpenAPI document structs for serde deserialization.
//!
//! Only the narrow subset the generator understands is modelled. Every field is
//! optional or defaulted and unknown keys are ignored. A node of the wrong shape
//! (`null`, a boolean schema, a string where a map is expected) falls back to its
//! default instead of failing the document, so map and list entries are
//! recovered one by one. Maps keep document order.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{DefaultOnError, serde_as};

/// Root OpenAPI document.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpenApiDocument {
    /// Path templates mapped to their operations.
    #[serde_as(as = "DefaultOnError<IndexMap<_, DefaultOnError>>")]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components (only `schemas` is read).
    #[serde_as(as = "DefaultOnError")]
    pub components: Option<Components>,
}

/// Components section containing reusable schemas.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    /// Named schema definitions, one generated data type each.
    #[serde_as(as = "DefaultOnError<IndexMap<_, DefaultOnError>>")]
    pub schemas: IndexMap<String, Schema>,
}

/// A path item containing operations for the CRUD methods.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathItem {
    #[serde_as(as = "DefaultOnError")]
    pub summary: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub description: Option<String>,
    /// Path-level parameters shared by all operations.
    #[serde_as(as = "DefaultOnError<Vec<DefaultOnError>>")]
    pub parameters: Vec<Parameter>,
    #[serde_as(as = "DefaultOnError")]
    pub get: Option<Operation>,
    #[serde_as(as = "DefaultOnError")]
    pub post: Option<Operation>,
    #[serde_as(as = "DefaultOnError")]
    pub put: Option<Operation>,
    #[serde_as(as = "DefaultOnError")]
    pub delete: Option<Operation>,
}

/// An API operation.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    #[serde_as(as = "DefaultOnError")]
    pub operation_id: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub summary: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError<Vec<DefaultOnError>>")]
    pub parameters: Vec<Parameter>,
    #[serde_as(as = "DefaultOnError")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code, in document order.
    #[serde_as(as = "DefaultOnError<IndexMap<_, DefaultOnError>>")]
    pub responses: IndexMap<String, Response>,
}

/// A parameter (path, query, header or cookie).
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde_as(as = "DefaultOnError")]
    pub name: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "in")]
    pub location: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub required: bool,
    #[serde_as(as = "DefaultOnError")]
    pub schema: Option<Schema>,
}

/// A request body definition.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestBody {
    #[serde_as(as = "DefaultOnError")]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    pub required: bool,
    #[serde_as(as = "DefaultOnError<IndexMap<_, DefaultOnError>>")]
    pub content: IndexMap<String, MediaType>,
}

/// A response definition.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde_as(as = "DefaultOnError")]
    pub description: Option<String>,
    #[serde_as(as = "DefaultOnError<IndexMap<_, DefaultOnError>>")]
    pub content: IndexMap<String, MediaType>,
}

/// Media type content (e.g. `application/json`).
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    #[serde_as(as = "DefaultOnError")]
    pub schema: Option<Schema>,
}

/// JSON Schema node used in OpenAPI.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde_as(as = "DefaultOnError")]
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Item schema for array types.
    #[serde_as(as = "DefaultOnError")]
    pub items: Option<Box<Schema>>,

    /// Properties for object types.
    #[serde_as(as = "DefaultOnError<IndexMap<_, DefaultOnError>>")]
    pub properties: IndexMap<String, Schema>,

    #[serde_as(as = "DefaultOnError")]
    pub description: Option<String>,

    /// Format hint (e.g., date-time, uuid).
    #[serde_as(as = "DefaultOnError")]
    pub format: Option<String>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    /// The type name that drives resolution: the single type, or the first
    /// non-`null` entry of a type array.
    pub fn effective(&self) -> Option<&str> {
        match self {
            SchemaType::Single(t) => Some(t.as_str()),
            SchemaType::Multiple(types) => types
                .iter()
                .map(String::as_str)
                .find(|t| *t != "null"),
        }
    }
}

/// Root wrapper: valid JSON that is not an object reads as an empty document.
#[serde_as]
#[derive(Deserialize)]
#[serde(transparent)]
struct LenientRoot(#[serde_as(as = "DefaultOnError")] OpenApiDocument);

impl OpenApiDocument {
    /// Parse an OpenAPI document from a JSON string. Only syntax errors fail.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<LenientRoot>(json).map(|root| root.0)
    }

    /// Named schema definitions, empty when the document has no components.
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.components
            .iter()
            .flat_map(|components| components.schemas.iter())
    }
}

impl Schema {
    /// Whether the node is an array with an item schema. A bare `"array"` type
    /// without `items` is not treated as an array.
    pub fn is_array(&self) -> bool {
        self.items.is_some()
            && self
                .schema_type
                .as_ref()
                .and_then(SchemaType::effective)
                .is_some_and(|t| t == "array")
    }
}

impl RequestBody {
    /// Schema of the `application/json` media type, if declared.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_media_schema(&self.content)
    }

    /// Whether an `application/json` media type is declared at all.
    pub fn has_json(&self) -> bool {
        self.content.contains_key(JSON_MEDIA_TYPE)
    }
}

impl Response {
    /// Schema of the `application/json` media type, if declared.
    pub fn json_schema(&self) -> Option<&Schema> {
        json_media_schema(&self.content)
    }
}

const JSON_MEDIA_TYPE: &str = "application/json";

fn json_media_schema(content: &IndexMap<String, MediaType>) -> Option<&Schema> {
    content
        .get(JSON_MEDIA_TYPE)
        .and_then(|media| media.schema.as_ref())
}
