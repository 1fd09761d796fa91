//! Command-line front end: argument parsing, settings layering, logging and
//! exit codes around [`genese_core`].

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use std::path::PathBuf;

use clap::Parser;
use genese_core::{Framework, ReturnStyle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod common;
pub mod config;
mod generate;

/// Environment variable holding a log level or a full filter spec.
pub const LOG_ENV: &str = "GENESE_LOG";

const LOG_TARGETS: [&str; 2] = ["genese_core", "genese_cli"];

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "genese",
    version,
    about = "Generate TypeScript data types and request services from an OpenAPI document"
)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "OpenAPI JSON document [default: ./genese-api.json]"
    )]
    pub input: Option<PathBuf>,
    #[arg(
        long,
        value_name = "EXT",
        help = "Extension tag of data type files [default: datatype]"
    )]
    pub datatype_extension: Option<String>,
    #[arg(
        long,
        value_name = "EXT",
        help = "Extension tag of service files, empty to omit [default: service]"
    )]
    pub service_extension: Option<String>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Output directory of data types [default: ./src/genese/datatypes]"
    )]
    pub datatypes_output: Option<PathBuf>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Output directory of services [default: ./src/genese/services]"
    )]
    pub services_output: Option<PathBuf>,
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Write one service per first path segment"
    )]
    pub split_services: Option<bool>,
    #[arg(
        long,
        value_name = "FRAMEWORK",
        help = "angular or react; detected from package.json when omitted"
    )]
    pub framework: Option<Framework>,
    #[arg(
        long,
        value_name = "STYLE",
        help = "observable or promise; defaults to the framework's usual style"
    )]
    pub return_style: Option<ReturnStyle>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Project root holding package.json and genese.toml. Defaults to current working directory"
    )]
    pub project_dir: Option<PathBuf>,
    #[arg(long, value_name = "FILE", help = "Config file to use instead of <project-dir>/genese.toml")]
    pub config: Option<PathBuf>,
}

/// Parse `args` (program name first), run the generator and return the exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            init_tracing();
            generate::run(cli)
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    let filter = log_filter(std::env::var(LOG_ENV).ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

// GENESE_LOG controls log level: "trace", "debug", "info", "warn", "error"
// or a full tracing filter spec like "genese_core=debug"
fn log_filter(value: Option<&str>) -> String {
    match value {
        Some(level) if is_plain_level(level) => LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(","),
        Some(spec) => spec.to_string(),
        None => LOG_TARGETS
            .iter()
            .map(|target| format!("{target}=info"))
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
