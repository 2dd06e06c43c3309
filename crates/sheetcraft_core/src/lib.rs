//! Core data types for the Sheetcraft structured-generation pipeline.
//!
//! This crate provides the request, option, schema and page types shared by
//! the repair, transport, registry and orchestration crates.

mod media;
mod observability;
mod options;
mod pages;
mod request;
mod schema;

pub use media::MediaAttachment;
pub use observability::{MetricsExporter, init_observability, shutdown_observability};
pub use options::{
    ActivityOptions, CustomInput, Difficulty, GenerationMode, MAX_GRID_SIZE, MAX_ITEMS, MAX_NUMBER,
    MAX_SEQUENCE_LENGTH, MAX_WORKSHEETS, StudentContext,
};
pub use pages::{GenerationOutcome, GenerationPath, ResultPages};
pub use request::{DEFAULT_MODEL, GenerationRequest, GenerationRequestBuilder};
pub use schema::{ObjectSchemaBuilder, PrimitiveKind, SchemaDescriptor, json_type_name};
