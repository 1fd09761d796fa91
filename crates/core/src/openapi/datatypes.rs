//! Build one [`DataType`] per component schema.

use std::collections::HashSet;

use tracing::debug;

use super::model::{DataType, Field, Import};
use super::resolver::{NoImports, resolve};
use super::spec::{OpenApiDocument, Schema};
use super::utils::kebabize;

/// Property name that marks a dictionary schema; rendered as an index signature.
const INDEXABLE_PROPERTY: &str = "gnIndexableType";
const INDEX_SIGNATURE: &str = "[key: string]";

/// Build the data types of every named schema, in document order.
pub fn build_data_types(document: &OpenApiDocument, datatype_extension: &str) -> Vec<DataType> {
    let data_types: Vec<DataType> = document
        .schemas()
        .map(|(name, schema)| build_data_type(name, schema, datatype_extension))
        .collect();
    debug!(count = data_types.len(), "Built data types.");
    data_types
}

fn build_data_type(name: &str, schema: &Schema, datatype_extension: &str) -> DataType {
    let fields: Vec<Field> = schema
        .properties
        .iter()
        .map(|(property, node)| build_field(property, node))
        .collect();

    let imports: Vec<Import> = {
        let mut seen = HashSet::new();
        fields
            .iter()
            .filter_map(|field| field.ty.named_base())
            .filter(|referenced| *referenced != name && seen.insert(*referenced))
            .map(|referenced| import_for(referenced, datatype_extension))
            .collect()
    };

    DataType {
        name: name.to_string(),
        fields,
        imports,
    }
}

fn build_field(property: &str, node: &Schema) -> Field {
    let ty = resolve(Some(node), &mut NoImports);
    if property == INDEXABLE_PROPERTY {
        return Field {
            name: INDEX_SIGNATURE.to_string(),
            ty,
            default_value: None,
        };
    }
    Field {
        name: property.to_string(),
        default_value: Some(ty.default_value()),
        ty,
    }
}

/// Import of a sibling data type file.
fn import_for(type_name: &str, datatype_extension: &str) -> Import {
    Import {
        imported_things: vec![type_name.to_string()],
        module: format!("./{}.{datatype_extension}", kebabize(type_name)),
    }
}
