//! OpenAPI document model and the builders that turn it into generation models.
//!
//! The pipeline is: parse ([`spec`]) → resolve schemas ([`resolver`]) → build
//! data types ([`datatypes`]) and endpoints ([`endpoints`]) into the [`model`]
//! types consumed by the renderer.

pub mod datatypes;
pub mod endpoints;
pub mod model;
pub mod resolver;
pub mod spec;
pub mod types;
pub mod utils;

pub use datatypes::build_data_types;
pub use endpoints::{EndpointsBuilder, ImportRegistry, group_by_base_path};
pub use model::{
    DataType, Endpoint, EndpointSet, Field, Import, ParamLocation, Parameter, ServiceGroup,
};
pub use resolver::{ImportSink, NoImports, resolve};
pub use spec::OpenApiDocument;
pub use types::{Crud, Primitive, ResolvedType};
