//! Lookup tables and the resolved type representation.

use std::fmt;

use serde::{Serialize, Serializer};

/// Primitive TypeScript types a schema can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    /// Catch-all for absent or unrecognised schema types.
    Any,
}

/// Schema `type` values that map to a primitive. Everything else is `Any`.
const SCHEMA_PRIMITIVES: [(&str, Primitive); 4] = [
    ("string", Primitive::String),
    ("number", Primitive::Number),
    ("integer", Primitive::Number),
    ("boolean", Primitive::Boolean),
];

impl Primitive {
    /// Look up an OpenAPI schema type in the primitive table.
    pub fn from_schema_type(schema_type: Option<&str>) -> Self {
        schema_type
            .and_then(|t| {
                SCHEMA_PRIMITIVES
                    .iter()
                    .find(|(name, _)| *name == t)
                    .map(|(_, primitive)| *primitive)
            })
            .unwrap_or(Primitive::Any)
    }

    /// TypeScript type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Any => "any",
        }
    }

    /// Literal used to initialise a field of this type.
    pub fn default_value(&self) -> &'static str {
        match self {
            Primitive::String => "''",
            Primitive::Number => "0",
            Primitive::Boolean => "false",
            Primitive::Any => "undefined",
        }
    }

    /// Built-in wrapper object used as the genese instance of a primitive response.
    pub fn global_object(&self) -> &'static str {
        match self {
            Primitive::String => "String",
            Primitive::Number => "Number",
            Primitive::Boolean => "Boolean",
            Primitive::Any => "Object",
        }
    }
}

/// A fully resolved schema type: a primitive, an array, or a named data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    Primitive(Primitive),
    Array(Box<ResolvedType>),
    Named(String),
}

impl ResolvedType {
    /// The catch-all `any` type.
    pub const ANY: ResolvedType = ResolvedType::Primitive(Primitive::Any);

    pub fn array_of(item: ResolvedType) -> Self {
        ResolvedType::Array(Box::new(item))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ResolvedType::Array(_))
    }

    /// Element type with every array level stripped.
    pub fn base(&self) -> &ResolvedType {
        match self {
            ResolvedType::Array(item) => item.base(),
            other => other,
        }
    }

    /// Name of the referenced data type, looking through arrays.
    pub fn named_base(&self) -> Option<&str> {
        match self.base() {
            ResolvedType::Named(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Expression initialising a field of this type: the primitive literal,
    /// `[<item default>]` for arrays, `new Name()` for data types.
    pub fn default_value(&self) -> String {
        match self {
            ResolvedType::Primitive(p) => p.default_value().to_string(),
            ResolvedType::Array(item) => format!("[{}]", item.default_value()),
            ResolvedType::Named(name) => format!("new {name}()"),
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Primitive(p) => f.write_str(p.as_str()),
            ResolvedType::Array(item) => write!(f, "{item}[]"),
            ResolvedType::Named(name) => f.write_str(name),
        }
    }
}

impl Serialize for ResolvedType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Endpoint method. `GetAll` is a `get` on a path without shared parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Crud {
    Get,
    GetAll,
    Post,
    Put,
    Delete,
}

impl Crud {
    /// Prefix used when deriving the endpoint name.
    pub fn verb(&self) -> &'static str {
        match self {
            Crud::Get => "get",
            Crud::GetAll => "get-all",
            Crud::Post => "create",
            Crud::Put => "update",
            Crud::Delete => "delete",
        }
    }

    /// Lowercase HTTP method sent on the wire.
    pub fn http_method(&self) -> &'static str {
        match self {
            Crud::Get | Crud::GetAll => "get",
            Crud::Post => "post",
            Crud::Put => "put",
            Crud::Delete => "delete",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Crud::Get => "GET",
            Crud::GetAll => "GETALL",
            Crud::Post => "POST",
            Crud::Put => "PUT",
            Crud::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Crud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
