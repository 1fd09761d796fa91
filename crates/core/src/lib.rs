//! Generate TypeScript data types and request services from an OpenAPI document.
//!
//! The pipeline reads a JSON OpenAPI document, builds one data type per
//! component schema and one endpoint per CRUD operation, then renders Angular
//! or React services through embedded templates:
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//!
//! use genese_core::{GenerateOptions, RenderOptions, detect_framework, generate, write_files};
//!
//! # fn main() -> Result<(), genese_core::GeneseError> {
//! let framework = detect_framework(Path::new("."))?;
//! let options = GenerateOptions {
//!     input: PathBuf::from("./genese-api.json"),
//!     render: RenderOptions::new(framework),
//! };
//! write_files(&generate(&options)?)?;
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod error;
pub mod generator;
pub mod openapi;
pub mod project;
pub mod render;

pub use error::{GeneseError, GeneseResult};
pub use generator::{GenerateOptions, generate, load_document, write_files};
pub use project::detect_framework;
pub use render::{Framework, GeneratedFile, RenderOptions, Renderer, ReturnStyle};
