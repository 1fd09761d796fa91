//! Schema resolution shared by the data type and endpoint builders.
//!
//! Resolution is total: every schema node (or its absence) maps to exactly one
//! [`ResolvedType`]. Named references are reported to an [`ImportSink`] so callers
//! that emit imports can record them while resolving.

use super::spec::{Schema, SchemaType};
use super::types::{Primitive, ResolvedType};

/// Receives the name of every data type a resolution passes through.
pub trait ImportSink {
    fn register(&mut self, type_name: &str);
}

/// Sink for callers that derive imports from the resolved type afterwards.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImports;

impl ImportSink for NoImports {
    fn register(&mut self, _type_name: &str) {}
}

/// Resolve a schema node, in priority order: `$ref`, array with items, primitive.
pub fn resolve(schema: Option<&Schema>, sink: &mut dyn ImportSink) -> ResolvedType {
    let Some(schema) = schema else {
        return ResolvedType::ANY;
    };

    if let Some(ref_path) = &schema.ref_path {
        let name = ref_to_type_name(ref_path);
        sink.register(name);
        return ResolvedType::Named(name.to_string());
    }

    if schema.is_array() {
        let item = resolve(schema.items.as_deref(), sink);
        return ResolvedType::array_of(item);
    }

    ResolvedType::Primitive(Primitive::from_schema_type(
        schema.schema_type.as_ref().and_then(SchemaType::effective),
    ))
}

/// Extract the type name from a `$ref` pointer: its final path segment.
pub fn ref_to_type_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}
