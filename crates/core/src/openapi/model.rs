//! Intermediate model handed from the builders to the renderer.
//!
//! - DataType / Field: one generated class per component schema
//! - Endpoint / Parameter: one generated request method per CRUD operation
//! - Import: symbols pulled into a generated file from a sibling module

use std::collections::HashSet;

use serde::Serialize;

use super::types::{Crud, ResolvedType};

/// A field of a generated data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ResolvedType,
    /// Initialiser expression; `None` for index signatures.
    pub default_value: Option<String>,
}

/// An ES import: `import { a, b } from 'module';`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    pub imported_things: Vec<String>,
    pub module: String,
}

/// A generated data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataType {
    pub name: String,
    pub fields: Vec<Field>,
    pub imports: Vec<Import>,
}

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
    /// The synthetic request body parameter.
    Body,
}

impl ParamLocation {
    /// Map an OpenAPI `in` value; unknown or absent values are treated as query parameters.
    pub fn from_openapi(location: Option<&str>) -> Self {
        match location {
            Some("path") => ParamLocation::Path,
            Some("header") => ParamLocation::Header,
            Some("cookie") => ParamLocation::Cookie,
            _ => ParamLocation::Query,
        }
    }
}

/// A request method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ResolvedType,
    pub description: Option<String>,
    pub location: ParamLocation,
}

/// A generated request method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// camelCase method name, e.g. `getWidgetsById`.
    pub name: String,
    pub method: Crud,
    /// Template-literal path, e.g. `/widgets/${id}`.
    pub path: String,
    /// First segment of the raw path, used to split services.
    pub base_path: String,
    /// Path-level, then operation-level parameters, then the body if any.
    pub parameters: Vec<Parameter>,
    pub body: Option<Parameter>,
    pub description: Option<String>,
    pub response_type: ResolvedType,
    /// Type responses are mapped into: the response base type, or a built-in
    /// wrapper object for primitives.
    pub genese_instance: String,
}

impl Endpoint {
    /// Every data type name this endpoint mentions.
    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter_map(|p| p.ty.named_base())
            .chain(self.response_type.named_base())
            .chain(std::iter::once(self.genese_instance.as_str()))
    }
}

/// Output of the endpoint builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointSet {
    pub endpoints: Vec<Endpoint>,
    /// Imports for every referenced data type, no symbol repeated.
    pub imports: Vec<Import>,
}

/// Endpoints rendered into one service file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceGroup {
    /// Base path the group was split on; `None` for the single combined service.
    pub name: Option<String>,
    pub endpoints: Vec<Endpoint>,
    pub imports: Vec<Import>,
}

impl ServiceGroup {
    /// Build a group keeping only the imports its endpoints need.
    pub fn new(name: Option<String>, endpoints: Vec<Endpoint>, imports: &[Import]) -> Self {
        let imports = {
            let needed: HashSet<&str> = endpoints
                .iter()
                .flat_map(Endpoint::referenced_types)
                .collect();
            imports
                .iter()
                .filter(|import| {
                    import
                        .imported_things
                        .iter()
                        .any(|thing| needed.contains(thing.as_str()))
                })
                .cloned()
                .collect()
        };
        Self {
            name,
            endpoints,
            imports,
        }
    }
}
