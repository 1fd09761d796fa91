//! TypeScript rendering of data types and request services.
//!
//! Templates are embedded at compile time and rendered with tera. Every file is
//! rendered in memory first; writing is left to [`crate::generator::write_files`].

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tera::{Context, Tera, Value};
use tracing::debug;

use crate::error::GeneseResult;
use crate::openapi::model::{DataType, EndpointSet, ServiceGroup};
use crate::openapi::utils::{kebabize, quote_if_needed};

mod view;

use view::ServiceView;

const DATATYPE_TEMPLATE: &str = "datatype.ts";
const ANGULAR_SERVICE_TEMPLATE: &str = "service-angular.ts";
const REACT_SERVICE_TEMPLATE: &str = "service-react.ts";
const AXIOS_TEMPLATE: &str = "axios.ts";

const TEMPLATES: [(&str, &str); 8] = [
    ("imports.ts", include_str!("templates/imports.ts.tera")),
    ("doc.ts", include_str!("templates/doc.ts.tera")),
    (DATATYPE_TEMPLATE, include_str!("templates/datatype.ts.tera")),
    ("method-angular.ts", include_str!("templates/method-angular.ts.tera")),
    ("method-react.ts", include_str!("templates/method-react.ts.tera")),
    (ANGULAR_SERVICE_TEMPLATE, include_str!("templates/service-angular.ts.tera")),
    (REACT_SERVICE_TEMPLATE, include_str!("templates/service-react.ts.tera")),
    (AXIOS_TEMPLATE, include_str!("templates/axios.ts.tera")),
];

const SERVICE_FILE_PREFIX: &str = "genese-request";
const AXIOS_FILE: &str = "axios.ts";

/// Front-end framework the services are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Angular,
    React,
}

impl Framework {
    /// Angular services return observables, React services return promises.
    pub fn default_return_style(self) -> ReturnStyle {
        match self {
            Framework::Angular => ReturnStyle::Observable,
            Framework::React => ReturnStyle::Promise,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Angular => "angular",
            Framework::React => "react",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "angular" => Ok(Framework::Angular),
            "react" => Ok(Framework::React),
            other => Err(format!("unknown framework '{other}', expected angular or react")),
        }
    }
}

/// Return type of the generated request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnStyle {
    Observable,
    Promise,
}

impl ReturnStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ReturnStyle::Observable => "observable",
            ReturnStyle::Promise => "promise",
        }
    }
}

impl fmt::Display for ReturnStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "observable" => Ok(ReturnStyle::Observable),
            "promise" => Ok(ReturnStyle::Promise),
            other => Err(format!(
                "unknown return style '{other}', expected observable or promise"
            )),
        }
    }
}

/// Everything the renderer needs besides the models themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub framework: Framework,
    pub return_style: ReturnStyle,
    pub datatype_extension: String,
    /// Inserted before `.ts` in service file names; empty to omit.
    pub service_extension: String,
    pub datatypes_output: PathBuf,
    pub services_output: PathBuf,
    /// One service per first path segment instead of a single service.
    pub split_services: bool,
}

impl RenderOptions {
    /// Defaults for a framework: `datatype`/`service` extensions, outputs under
    /// `./src/genese`, a single service and the framework's return style.
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            return_style: framework.default_return_style(),
            datatype_extension: "datatype".to_string(),
            service_extension: "service".to_string(),
            datatypes_output: PathBuf::from("./src/genese/datatypes"),
            services_output: PathBuf::from("./src/genese/services"),
            split_services: false,
        }
    }
}

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Renders generation models into TypeScript sources.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> GeneseResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("ts_key", ts_key);
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera, options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every data type, the service file(s) and, for React, the axios instance.
    pub fn render_all(
        &self,
        data_types: &[DataType],
        endpoints: EndpointSet,
    ) -> GeneseResult<Vec<GeneratedFile>> {
        let mut files = data_types
            .iter()
            .map(|data_type| self.render_data_type(data_type))
            .collect::<GeneseResult<Vec<_>>>()?;

        let groups = if self.options.split_services {
            endpoints.split_by_base_path()
        } else {
            vec![endpoints.into_single_group()]
        };
        for group in &groups {
            files.push(self.render_service(group)?);
        }

        if self.options.framework == Framework::React {
            files.push(self.render_axios()?);
        }

        debug!(
            files = files.len(),
            framework = %self.options.framework,
            "Rendered files."
        );
        Ok(files)
    }

    pub fn render_data_type(&self, data_type: &DataType) -> GeneseResult<GeneratedFile> {
        let context = Context::from_serialize(data_type)?;
        let contents = self.tera.render(DATATYPE_TEMPLATE, &context)?;
        Ok(GeneratedFile {
            path: self.data_type_path(&data_type.name),
            contents,
        })
    }

    pub fn render_service(&self, group: &ServiceGroup) -> GeneseResult<GeneratedFile> {
        let view = ServiceView::new(group, self.options.framework, self.options.return_style);
        let context = Context::from_serialize(&view)?;
        let template = match self.options.framework {
            Framework::Angular => ANGULAR_SERVICE_TEMPLATE,
            Framework::React => REACT_SERVICE_TEMPLATE,
        };
        let contents = self.tera.render(template, &context)?;
        Ok(GeneratedFile {
            path: self.service_path(group.name.as_deref()),
            contents,
        })
    }

    /// The shared axios instance imported by React services.
    pub fn render_axios(&self) -> GeneseResult<GeneratedFile> {
        let contents = self.tera.render(AXIOS_TEMPLATE, &Context::new())?;
        Ok(GeneratedFile {
            path: self.options.services_output.join(AXIOS_FILE),
            contents,
        })
    }

    /// `<datatypes_output>/<kebab(name)>.<datatype_extension>.ts`
    pub fn data_type_path(&self, name: &str) -> PathBuf {
        self.options.datatypes_output.join(format!(
            "{}.{}.ts",
            kebabize(name),
            self.options.datatype_extension
        ))
    }

    /// `<services_output>/genese-request[-<group>][.<service_extension>].ts`
    pub fn service_path(&self, group: Option<&str>) -> PathBuf {
        let mut file_name = SERVICE_FILE_PREFIX.to_string();
        if let Some(group) = group {
            file_name.push('-');
            file_name.push_str(group);
        }
        if !self.options.service_extension.is_empty() {
            file_name.push('.');
            file_name.push_str(&self.options.service_extension);
        }
        file_name.push_str(".ts");
        self.options.services_output.join(file_name)
    }
}

fn ts_key(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("Filter `ts_key` expects a string"))?;
    Ok(Value::String(quote_if_needed(key)))
}
