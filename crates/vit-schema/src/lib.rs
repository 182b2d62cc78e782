//! # vit-schema
//!
//! JSON Schema generation, validation, and registry for Vitrine.
//!
//! Entity and input types are defined in `vit-core` with `#[derive(JsonSchema)]`.
//! This crate collects their schemas into a [`SchemaRegistry`] that the server
//! uses to validate request bodies and the CLI uses for `vitrine schema`.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
