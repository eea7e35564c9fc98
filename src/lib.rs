//! # Baserepo - Schema-Driven Repository Layer
//!
//! Baserepo is a thin repository layer over a document database collection.
//! A declarative schema drives everything: analyzing it once yields the
//! identifier fields, the default sort, the key field and the indexes to
//! create, and every call is routed through a normalization pipeline that
//! rewrites string identifiers to native object ids before the filter
//! reaches the driver.
//!
//! ## Key Features
//!
//! - **Schema analysis**: identifier fields, default sorting, key field and
//!   index requests are derived from one schema description
//! - **Identifier coercion**: query filters written with plain hex strings
//!   match stored native ids, through `$in`/`$all`/`$nin`, `$not`/`$ne` and
//!   the `$or`/`$and`/`$nor` combinators
//! - **Flexible call shapes**: a lone document argument is classified as
//!   filter or options by its top-level keys
//! - **Fire-and-forget indexing**: index creation runs on background threads
//!   and never blocks or fails construction
//! - **Driver-agnostic**: the repository talks to any
//!   [repository::DocumentCollection] implementation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use baserepo::common::SortOrder;
//! use baserepo::repository::BaseRepository;
//! use baserepo::schema::{FieldType, Format, ScalarSchema, Schema};
//! use baserepo::{doc, QueryArgs};
//! use std::sync::Arc;
//!
//! let schema = Schema::new()
//!     .field("_id", ScalarSchema::of(FieldType::String).format(Format::MongoId).key())
//!     .field("userName", ScalarSchema::of(FieldType::String).sort(SortOrder::Ascending).unique());
//!
//! let repository = BaseRepository::new(Arc::new(collection), &schema);
//!
//! // string ids are coerced to native ids before the driver sees them
//! let user = repository.find_one(QueryArgs::from(doc! {
//!     "_id": "507f191e810c19729de860ea",
//! }))?;
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Shared value model, sort orders and constants
//! - [`document`] - Ordered key-value documents and the [doc!] macro
//! - [`errors`] - Error types and result definitions
//! - [`object_id`] - Native 12-byte identifiers
//! - [`query`] - Call-shape resolution, filter normalization, sort parsing
//! - [`repository`] - The repository facade and its collaborator seams
//! - [`schema`] - Declarative schemas and their analysis

pub mod common;
pub mod document;
pub mod errors;
pub mod object_id;
pub mod query;
pub mod repository;
pub mod schema;

pub use crate::common::{SortOrder, Value};
pub use crate::document::Document;
pub use crate::errors::{ErrorKind, RepoError, RepoResult};
pub use crate::object_id::ObjectId;
pub use crate::query::{QueryArgs, SortSpec};
pub use crate::repository::{BaseRepository, DocumentCollection, FindOptions};
pub use crate::schema::Schema;

#[cfg(test)]
mod tests {
    // Setup only one time throughout the project.
    // It will take effect during test, project wide
    #[ctor::ctor]
    fn init() {
        colog::init();
    }
}
