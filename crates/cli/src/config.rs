//! Layered settings: `genese.toml`, then command-line flags, then defaults.

use std::fs;
use std::path::{Path, PathBuf};

use genese_core::{Framework, GenerateOptions, GeneseError, GeneseResult, RenderOptions, ReturnStyle};
use serde::Deserialize;
use tracing::debug;

use crate::Cli;

/// Config file looked up in the project directory when `--config` is not given.
pub const CONFIG_FILE: &str = "genese.toml";

const DEFAULT_INPUT: &str = "./genese-api.json";
const DEFAULT_DATATYPE_EXTENSION: &str = "datatype";
const DEFAULT_SERVICE_EXTENSION: &str = "service";
const DEFAULT_DATATYPES_OUTPUT: &str = "./src/genese/datatypes";
const DEFAULT_SERVICES_OUTPUT: &str = "./src/genese/services";

/// Contents of `genese.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub datatype_extension: Option<String>,
    pub service_extension: Option<String>,
    pub datatypes_output: Option<PathBuf>,
    pub services_output: Option<PathBuf>,
    pub split_services: Option<bool>,
    pub framework: Option<Framework>,
    pub return_style: Option<ReturnStyle>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> GeneseResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            GeneseError::PackageContext(format!("cannot read {}: {err}", path.display()))
        })?;
        let config = toml::from_str(&contents).map_err(|err| {
            GeneseError::PackageContext(format!("cannot parse {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "Loaded config file.");
        Ok(config)
    }

    /// Load the explicit config file, which must exist, or the optional
    /// `genese.toml` of the project directory.
    pub fn discover(project_dir: &Path, explicit: Option<&Path>) -> GeneseResult<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(GeneseError::PackageContext(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        let path = project_dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Fully resolved settings of a run. Paths are joined onto the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_dir: PathBuf,
    pub input: PathBuf,
    pub datatype_extension: String,
    pub service_extension: String,
    pub datatypes_output: PathBuf,
    pub services_output: PathBuf,
    pub split_services: bool,
    /// `None` means detect from `package.json`.
    pub framework: Option<Framework>,
    /// `None` means the framework's default.
    pub return_style: Option<ReturnStyle>,
}

impl Settings {
    /// Merge the sources. A value set in the config file wins over the same flag.
    pub fn resolve(config: ConfigFile, cli: &Cli, project_dir: PathBuf) -> Self {
        let path = |file: Option<PathBuf>, flag: &Option<PathBuf>, default: &str| {
            project_dir.join(file.or_else(|| flag.clone()).unwrap_or_else(|| PathBuf::from(default)))
        };
        let text = |file: Option<String>, flag: &Option<String>, default: &str| {
            file.or_else(|| flag.clone()).unwrap_or_else(|| default.to_string())
        };

        Self {
            input: path(config.input, &cli.input, DEFAULT_INPUT),
            datatype_extension: text(
                config.datatype_extension,
                &cli.datatype_extension,
                DEFAULT_DATATYPE_EXTENSION,
            ),
            service_extension: text(
                config.service_extension,
                &cli.service_extension,
                DEFAULT_SERVICE_EXTENSION,
            ),
            datatypes_output: path(
                config.datatypes_output,
                &cli.datatypes_output,
                DEFAULT_DATATYPES_OUTPUT,
            ),
            services_output: path(
                config.services_output,
                &cli.services_output,
                DEFAULT_SERVICES_OUTPUT,
            ),
            split_services: config.split_services.or(cli.split_services).unwrap_or(false),
            framework: config.framework.or(cli.framework),
            return_style: config.return_style.or(cli.return_style),
            project_dir,
        }
    }

    pub fn into_options(self, framework: Framework) -> GenerateOptions {
        GenerateOptions {
            input: self.input,
            render: RenderOptions {
                framework,
                return_style: self
                    .return_style
                    .unwrap_or_else(|| framework.default_return_style()),
                datatype_extension: self.datatype_extension,
                service_extension: self.service_extension,
                datatypes_output: self.datatypes_output,
                services_output: self.services_output,
                split_services: self.split_services,
            },
        }
    }
}
