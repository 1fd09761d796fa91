//! View models handed to the service templates.
//!
//! Everything that needs string assembly (signatures, call arguments, doc
//! lines) is done here so the templates stay declarative.

use serde::Serialize;

use crate::openapi::model::{Endpoint, Import, ParamLocation, Parameter, ServiceGroup};
use crate::openapi::types::{Crud, ResolvedType};
use crate::openapi::utils::{
    camelize, is_reserved_word, needs_bracket_notation, pascalize, quote_if_needed,
};

use super::{Framework, ReturnStyle};

/// How a response payload is turned into the genese instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum Mapping {
    /// Returned as received.
    #[serde(rename = "none")]
    Passthrough,
    /// `Object.assign(new Instance(), data)`.
    #[serde(rename = "one")]
    Instance,
    /// Element-wise `Object.assign` over a list response.
    #[serde(rename = "each")]
    EachInstance,
}

#[derive(Debug, Serialize)]
pub(crate) struct ServiceView<'a> {
    pub class_name: String,
    pub instance_name: String,
    pub return_style: ReturnStyle,
    pub rxjs_imports: Vec<&'static str>,
    pub imports: &'a [Import],
    pub methods: Vec<MethodView<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MethodView<'a> {
    pub name: &'a str,
    pub http_method: &'static str,
    pub doc_lines: Vec<String>,
    pub signature: String,
    pub response_type: String,
    pub return_type: String,
    pub request_args: String,
    pub mapping: Mapping,
    pub genese_instance: &'a str,
}

impl<'a> ServiceView<'a> {
    pub(crate) fn new(
        group: &'a ServiceGroup,
        framework: Framework,
        return_style: ReturnStyle,
    ) -> Self {
        let methods: Vec<MethodView<'a>> = group
            .endpoints
            .iter()
            .map(|endpoint| MethodView::new(endpoint, return_style))
            .collect();
        let class_name = service_class_name(group.name.as_deref());
        Self {
            instance_name: lower_first(&class_name),
            class_name,
            return_style,
            rxjs_imports: rxjs_imports(framework, return_style, &methods),
            imports: &group.imports,
            methods,
        }
    }
}

impl<'a> MethodView<'a> {
    fn new(endpoint: &'a Endpoint, return_style: ReturnStyle) -> Self {
        let response_type = endpoint.response_type.to_string();
        let return_type = match return_style {
            ReturnStyle::Observable => format!("Observable<{response_type}>"),
            ReturnStyle::Promise => format!("Promise<{response_type}>"),
        };
        Self {
            name: &endpoint.name,
            http_method: endpoint.method.http_method(),
            doc_lines: doc_lines(endpoint),
            signature: signature(&endpoint.parameters),
            response_type,
            return_type,
            request_args: request_args(endpoint),
            mapping: mapping(endpoint),
            genese_instance: &endpoint.genese_instance,
        }
    }
}

/// `GeneseRequestService`, or `GeneseRequest<Group>Service` for a split service.
pub(crate) fn service_class_name(group: Option<&str>) -> String {
    let suffix = group
        .map(|name| pascalize(&name.replace(|c: char| !c.is_ascii_alphanumeric(), "-")))
        .unwrap_or_default();
    format!("GeneseRequest{suffix}Service")
}

/// Identifier used for a parameter in the generated method signature.
pub(crate) fn arg_name(name: &str) -> String {
    let arg = if needs_bracket_notation(name) {
        camelize(&name.replace(|c: char| !c.is_ascii_alphanumeric(), "-"))
    } else {
        name.to_string()
    };
    if arg.is_empty() || arg.starts_with(|c: char| c.is_ascii_digit()) || is_reserved_word(&arg) {
        format!("_{arg}")
    } else {
        arg
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

fn mapping(endpoint: &Endpoint) -> Mapping {
    match &endpoint.response_type {
        ResolvedType::Named(_) => Mapping::Instance,
        ResolvedType::Array(item)
            if endpoint.method == Crud::GetAll && matches!(**item, ResolvedType::Named(_)) =>
        {
            Mapping::EachInstance
        }
        _ => Mapping::Passthrough,
    }
}

fn rxjs_imports(
    framework: Framework,
    return_style: ReturnStyle,
    methods: &[MethodView<'_>],
) -> Vec<&'static str> {
    let mut imports = Vec::new();
    match (framework, return_style) {
        (Framework::Angular, ReturnStyle::Observable) => imports.push("Observable"),
        (Framework::Angular, ReturnStyle::Promise) => imports.push("firstValueFrom"),
        (Framework::React, ReturnStyle::Observable) => imports.extend(["from", "Observable"]),
        (Framework::React, ReturnStyle::Promise) => {}
    }
    if framework == Framework::Angular
        && methods.iter().any(|m| m.mapping != Mapping::Passthrough)
    {
        imports.push("map");
    }
    imports
}

fn signature(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{}: {}", arg_name(&p.name), p.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

fn doc_lines(endpoint: &Endpoint) -> Vec<String> {
    let mut lines: Vec<String> = endpoint
        .description
        .iter()
        .flat_map(|description| description.lines())
        .map(|line| doc_safe(line.trim_end()))
        .collect();
    for parameter in &endpoint.parameters {
        if let Some(description) = &parameter.description {
            let text = description.split_whitespace().collect::<Vec<_>>().join(" ");
            lines.push(format!(
                "@param {} {}",
                arg_name(&parameter.name),
                doc_safe(&text)
            ));
        }
    }
    lines
}

fn doc_safe(line: &str) -> String {
    line.replace("*/", "*\\/")
}

/// Arguments of the HTTP client call: URL, body for `post`/`put`, then an
/// options object carrying query parameters and headers.
fn request_args(endpoint: &Endpoint) -> String {
    let mut args = vec![format!("`{}`", url(endpoint))];
    if matches!(endpoint.method, Crud::Post | Crud::Put) {
        args.push(
            endpoint
                .body
                .as_ref()
                .map_or_else(|| "null".to_string(), |body| arg_name(&body.name)),
        );
    }
    if let Some(options) = request_options(&endpoint.parameters) {
        args.push(options);
    }
    args.join(", ")
}

/// Template-literal path with placeholders renamed to the signature's identifiers.
fn url(endpoint: &Endpoint) -> String {
    endpoint
        .parameters
        .iter()
        .filter(|p| p.location == ParamLocation::Path)
        .fold(endpoint.path.clone(), |path, p| {
            let arg = arg_name(&p.name);
            if arg == p.name {
                path
            } else {
                path.replace(&format!("${{{}}}", p.name), &format!("${{{arg}}}"))
            }
        })
}

fn request_options(parameters: &[Parameter]) -> Option<String> {
    let mut options = Vec::new();
    for (key, location) in [("params", ParamLocation::Query), ("headers", ParamLocation::Header)] {
        let entries: Vec<String> = parameters
            .iter()
            .filter(|p| p.location == location)
            .map(|p| object_entry(&p.name))
            .collect();
        if !entries.is_empty() {
            options.push(format!("{key}: {{ {} }}", entries.join(", ")));
        }
    }
    (!options.is_empty()).then(|| format!("{{ {} }}", options.join(", ")))
}

fn object_entry(name: &str) -> String {
    let arg = arg_name(name);
    if arg == name {
        arg
    } else {
        format!("{}: {arg}", quote_if_needed(name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::openapi::types::Primitive;

    fn param(name: &str, ty: ResolvedType, location: ParamLocation) -> Parameter {
        Parameter {
            name: name.into(),
            ty,
            description: None,
            location,
        }
    }

    fn endpoint(method: Crud, path: &str, parameters: Vec<Parameter>) -> Endpoint {
        let body = parameters
            .iter()
            .find(|p| p.location == ParamLocation::Body)
            .cloned();
        Endpoint {
            name: "call".into(),
            method,
            path: path.into(),
            base_path: "widgets".into(),
            parameters,
            body,
            description: None,
            response_type: ResolvedType::Named("Widget".into()),
            genese_instance: "Widget".into(),
        }
    }

    const STRING: ResolvedType = ResolvedType::Primitive(Primitive::String);

    #[test]
    fn test_service_class_names() {
        assert_eq!(service_class_name(None), "GeneseRequestService");
        assert_eq!(service_class_name(Some("widgets")), "GeneseRequestWidgetsService");
        assert_eq!(service_class_name(Some("pet-store")), "GeneseRequestPetStoreService");
        assert_eq!(service_class_name(Some("v1.0")), "GeneseRequestV10Service");
    }

    #[test]
    fn test_arg_names() {
        assert_eq!(arg_name("id"), "id");
        assert_eq!(arg_name("itemId"), "itemId");
        assert_eq!(arg_name("item-id"), "itemId");
        assert_eq!(arg_name("X-Tenant"), "XTenant");
        assert_eq!(arg_name("2fa"), "_2fa");
        assert_eq!(arg_name("default"), "_default");
        assert_eq!(arg_name("new"), "_new");
        assert_eq!(arg_name("class"), "_class");
    }

    #[test]
    fn test_get_with_path_param() {
        let e = endpoint(
            Crud::Get,
            "/widgets/${id}",
            vec![param("id", STRING, ParamLocation::Path)],
        );
        assert_eq!(request_args(&e), "`/widgets/${id}`");
        assert_eq!(signature(&e.parameters), "id: string");
    }

    #[test]
    fn test_reserved_parameter_names_are_prefixed() {
        let e = endpoint(
            Crud::Delete,
            "/widgets/${class}",
            vec![
                param("class", STRING, ParamLocation::Path),
                param("default", STRING, ParamLocation::Query),
            ],
        );
        assert_eq!(signature(&e.parameters), "_class: string, _default: string");
        assert_eq!(
            request_args(&e),
            "`/widgets/${_class}`, { params: { default: _default } }"
        );
    }

    #[test]
    fn test_post_without_body_sends_null() {
        let e = endpoint(Crud::Post, "/widgets", vec![]);
        assert_eq!(request_args(&e), "`/widgets`, null");
    }

    #[test]
    fn test_put_with_body_query_and_header() {
        let e = endpoint(
            Crud::Put,
            "/widgets/${widget-id}",
            vec![
                param("widget-id", STRING, ParamLocation::Path),
                param("dryRun", ResolvedType::Primitive(Primitive::Boolean), ParamLocation::Query),
                param("X-Tenant", STRING, ParamLocation::Header),
                param("body", ResolvedType::Named("Widget".into()), ParamLocation::Body),
            ],
        );
        assert_eq!(
            request_args(&e),
            "`/widgets/${widgetId}`, body, { params: { dryRun }, headers: { \"X-Tenant\": XTenant } }"
        );
        assert_eq!(
            signature(&e.parameters),
            "widgetId: string, dryRun: boolean, XTenant: string, body: Widget"
        );
    }

    #[test]
    fn test_cookie_params_are_not_sent() {
        assert_eq!(
            request_options(&[param("session", STRING, ParamLocation::Cookie)]),
            None
        );
    }

    #[test]
    fn test_mapping() {
        let mut e = endpoint(Crud::Get, "/widgets/${id}", vec![]);
        assert_eq!(mapping(&e), Mapping::Instance);

        e.method = Crud::GetAll;
        e.response_type = ResolvedType::array_of(ResolvedType::Named("Widget".into()));
        assert_eq!(mapping(&e), Mapping::EachInstance);

        e.method = Crud::Post;
        assert_eq!(mapping(&e), Mapping::Passthrough);

        e.method = Crud::GetAll;
        e.response_type = ResolvedType::array_of(STRING);
        assert_eq!(mapping(&e), Mapping::Passthrough);

        e.response_type = ResolvedType::array_of(ResolvedType::array_of(ResolvedType::Named(
            "Widget".into(),
        )));
        assert_eq!(mapping(&e), Mapping::Passthrough);
    }

    #[test]
    fn test_doc_lines() {
        let mut e = endpoint(
            Crud::Get,
            "/widgets/${id}",
            vec![Parameter {
                description: Some("Widget\n  identifier".into()),
                ..param("id", STRING, ParamLocation::Path)
            }],
        );
        e.description = Some("Fetch one widget.\nIgnores */ comments".into());
        assert_eq!(
            doc_lines(&e),
            [
                "Fetch one widget.",
                "Ignores *\\/ comments",
                "@param id Widget identifier",
            ]
        );
    }

    #[test]
    fn test_rxjs_imports() {
        let group = ServiceGroup {
            name: None,
            endpoints: vec![endpoint(Crud::Get, "/widgets/${id}", vec![])],
            imports: vec![],
        };
        let angular = ServiceView::new(&group, Framework::Angular, ReturnStyle::Observable);
        assert_eq!(angular.rxjs_imports, ["Observable", "map"]);
        let angular = ServiceView::new(&group, Framework::Angular, ReturnStyle::Promise);
        assert_eq!(angular.rxjs_imports, ["firstValueFrom", "map"]);
        let react = ServiceView::new(&group, Framework::React, ReturnStyle::Promise);
        assert!(react.rxjs_imports.is_empty());
        let react = ServiceView::new(&group, Framework::React, ReturnStyle::Observable);
        assert_eq!(react.rxjs_imports, ["from", "Observable"]);
        assert_eq!(react.instance_name, "geneseRequestService");
    }
}
