//! Declarative collection schemas and their analysis.
//!
//! A [Schema] describes the fields of a collection; [analyze] walks it once
//! at repository construction and extracts the identifier fields, default
//! sort, key field and index requests into a [SchemaMetadata].

pub mod analyzer;
pub mod descriptor;

pub use analyzer::{analyze, IndexRequest, SchemaMetadata};
pub use descriptor::{ArraySchema, FieldSchema, FieldType, Format, ObjectSchema, ScalarSchema, Schema};
