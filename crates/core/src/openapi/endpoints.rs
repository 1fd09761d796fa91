//! Build one [`Endpoint`] per CRUD operation of every path.
//!
//! The builder owns an [`ImportRegistry`] for the whole traversal: every `$ref`
//! met while resolving parameters, bodies and responses is registered there, so
//! the final import list never repeats a symbol.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::model::{Endpoint, EndpointSet, Import, ParamLocation, Parameter, ServiceGroup};
use super::resolver::{ImportSink, resolve};
use super::spec::{self, OpenApiDocument, Operation, PathItem, Response};
use super::types::{Crud, ResolvedType};
use super::utils::{camelize, kebabize, literalize, relative_module_path};

/// Success status codes tried, in order, when picking the response schema.
const SUCCESS_STATUS_PRIORITY: [&str; 7] = ["200", "201", "202", "203", "206", "207", "2XX"];

/// Consulted only when an operation declares no success status.
const DEFAULT_STATUS: &str = "default";

/// Group key for paths without a first segment.
const FALLBACK_GROUP: &str = "any";

const BODY_PARAMETER: &str = "body";

/// Accumulates imports of data type modules, keeping each symbol once.
#[derive(Debug, Clone)]
pub struct ImportRegistry {
    module_base: String,
    datatype_extension: String,
    imports: Vec<Import>,
    imported: HashSet<String>,
}

impl ImportRegistry {
    /// `module_base` is the import specifier prefix of the data type directory,
    /// as seen from the generated service files.
    pub fn new(module_base: impl Into<String>, datatype_extension: impl Into<String>) -> Self {
        Self {
            module_base: module_base.into(),
            datatype_extension: datatype_extension.into(),
            imports: Vec::new(),
            imported: HashSet::new(),
        }
    }

    /// Registry whose module base is the data type directory relative to the
    /// service directory.
    pub fn for_output_dirs(
        services_output: &Path,
        datatypes_output: &Path,
        datatype_extension: impl Into<String>,
    ) -> Self {
        Self::new(
            relative_module_path(services_output, datatypes_output),
            datatype_extension,
        )
    }

    /// Record an import, keeping only the symbols not imported yet. Returns
    /// false when nothing new was left and the import was dropped.
    pub fn add(&mut self, mut import: Import) -> bool {
        let mut seen = HashSet::new();
        import
            .imported_things
            .retain(|thing| !self.imported.contains(thing) && seen.insert(thing.clone()));
        if import.imported_things.is_empty() {
            return false;
        }
        self.imported.extend(import.imported_things.iter().cloned());
        self.imports.push(import);
        true
    }

    /// Module specifier of a data type file.
    pub fn module_for(&self, type_name: &str) -> String {
        format!(
            "{}/{}.{}",
            self.module_base,
            kebabize(type_name),
            self.datatype_extension
        )
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn into_imports(self) -> Vec<Import> {
        self.imports
    }
}

impl ImportSink for ImportRegistry {
    fn register(&mut self, type_name: &str) {
        let import = Import {
            imported_things: vec![type_name.to_string()],
            module: self.module_for(type_name),
        };
        self.add(import);
    }
}

/// Walks the document paths and produces the endpoints plus their imports.
#[derive(Debug)]
pub struct EndpointsBuilder<'a> {
    document: &'a OpenApiDocument,
    registry: ImportRegistry,
    endpoints: Vec<Endpoint>,
    names: HashSet<String>,
}

impl<'a> EndpointsBuilder<'a> {
    pub fn new(document: &'a OpenApiDocument, registry: ImportRegistry) -> Self {
        Self {
            document,
            registry,
            endpoints: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub fn build(mut self) -> EndpointSet {
        let document = self.document;
        for (path, item) in &document.paths {
            self.parse_path(path, item);
        }
        debug!(
            endpoints = self.endpoints.len(),
            imports = self.registry.imports().len(),
            "Built endpoints."
        );
        EndpointSet {
            endpoints: self.endpoints,
            imports: self.registry.into_imports(),
        }
    }

    fn parse_path(&mut self, path: &str, item: &PathItem) {
        let shared = self.parameters(path, &item.parameters);

        for (method, operation) in [
            (Crud::Get, item.get.as_ref()),
            (Crud::Post, item.post.as_ref()),
            (Crud::Put, item.put.as_ref()),
            (Crud::Delete, item.delete.as_ref()),
        ] {
            let Some(operation) = operation else {
                continue;
            };
            let endpoint = self.build_endpoint(path, method, operation, &shared);
            if !self.names.insert(endpoint.name.clone()) {
                warn!(
                    name = %endpoint.name,
                    path,
                    "Duplicate endpoint name."
                );
            }
            self.endpoints.push(endpoint);
        }
    }

    fn build_endpoint(
        &mut self,
        path: &str,
        method: Crud,
        operation: &Operation,
        shared: &[Parameter],
    ) -> Endpoint {
        let method = crud_method(method, shared);
        let response_type = self.response_type(operation);
        let body = self.body(path, operation);

        let mut parameters = shared.to_vec();
        for parameter in self.parameters(path, &operation.parameters) {
            parameters.retain(|existing| existing.name != parameter.name);
            parameters.push(parameter);
        }
        if let Some(body) = &body {
            parameters.push(body.clone());
        }

        let base_path = first_segment(path).to_string();
        Endpoint {
            name: endpoint_name(&base_path, method, shared),
            method,
            path: literalize(path),
            base_path,
            parameters,
            body,
            description: operation
                .description
                .clone()
                .or_else(|| operation.summary.clone()),
            genese_instance: genese_instance(method, &response_type),
            response_type,
        }
    }

    fn parameters(&mut self, path: &str, parameters: &[spec::Parameter]) -> Vec<Parameter> {
        parameters
            .iter()
            .filter(|parameter| {
                if parameter.name.is_empty() {
                    warn!(path, "Skipping parameter without a name.");
                    return false;
                }
                true
            })
            .map(|parameter| Parameter {
                name: parameter.name.clone(),
                ty: resolve(parameter.schema.as_ref(), &mut self.registry),
                description: parameter.description.clone(),
                location: ParamLocation::from_openapi(parameter.location.as_deref()),
            })
            .collect()
    }

    /// A declared success status settles the type, even without a schema (`204`
    /// resolves to `any`). Otherwise `default`, then the first response.
    fn response_type(&mut self, operation: &Operation) -> ResolvedType {
        let responses = &operation.responses;
        let schema = if responses.keys().any(|status| is_success_status(status)) {
            SUCCESS_STATUS_PRIORITY
                .iter()
                .find_map(|status| responses.get(*status).and_then(Response::json_schema))
                .or_else(|| {
                    responses
                        .iter()
                        .filter(|(status, _)| is_success_status(status))
                        .find_map(|(_, response)| response.json_schema())
                })
        } else {
            responses
                .get(DEFAULT_STATUS)
                .and_then(Response::json_schema)
                .or_else(|| responses.first().and_then(|(_, response)| response.json_schema()))
        };
        resolve(schema, &mut self.registry)
    }

    fn body(&mut self, path: &str, operation: &Operation) -> Option<Parameter> {
        let request_body = operation.request_body.as_ref()?;
        if !request_body.has_json() {
            debug!(path, "Skipping request body without an application/json media type.");
            return None;
        }
        Some(Parameter {
            name: BODY_PARAMETER.to_string(),
            ty: resolve(request_body.json_schema(), &mut self.registry),
            description: request_body.description.clone(),
            location: ParamLocation::Body,
        })
    }
}

fn is_success_status(status: &str) -> bool {
    status.starts_with('2')
}

/// `get` on a path without shared parameters lists the collection.
fn crud_method(method: Crud, shared: &[Parameter]) -> Crud {
    if method == Crud::Get && shared.is_empty() {
        Crud::GetAll
    } else {
        method
    }
}

fn endpoint_name(segment: &str, method: Crud, shared: &[Parameter]) -> String {
    let by = shared
        .first()
        .map(|parameter| format!("-by-{}", parameter.name))
        .unwrap_or_default();
    camelize(&format!("{}-{segment}{by}", method.verb()))
}

fn genese_instance(method: Crud, response_type: &ResolvedType) -> String {
    let base = if method == Crud::GetAll {
        response_type.base()
    } else {
        response_type
    };
    match base {
        ResolvedType::Primitive(primitive) => primitive.global_object().to_string(),
        other => other.to_string(),
    }
}

fn first_segment(path: &str) -> &str {
    path.split('/').nth(1).unwrap_or_default()
}

/// Group endpoints by the first segment of their path, keeping first-seen order.
pub fn group_by_base_path(endpoints: &[Endpoint]) -> IndexMap<String, Vec<Endpoint>> {
    let mut groups: IndexMap<String, Vec<Endpoint>> = IndexMap::new();
    for endpoint in endpoints {
        let key = if endpoint.base_path.is_empty() {
            FALLBACK_GROUP
        } else {
            endpoint.base_path.as_str()
        };
        groups
            .entry(key.to_string())
            .or_default()
            .push(endpoint.clone());
    }
    groups
}

impl EndpointSet {
    /// One service group per base path, each with the imports it needs.
    pub fn split_by_base_path(&self) -> Vec<ServiceGroup> {
        group_by_base_path(&self.endpoints)
            .into_iter()
            .map(|(name, endpoints)| ServiceGroup::new(Some(name), endpoints, &self.imports))
            .collect()
    }

    /// Every endpoint in a single service.
    pub fn into_single_group(self) -> ServiceGroup {
        ServiceGroup {
            name: None,
            endpoints: self.endpoints,
            imports: self.imports,
        }
    }
}
