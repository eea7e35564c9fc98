//! The repository facade and its collaborator seams.
//!
//! [BaseRepository] ties the schema analysis and query pipeline together in
//! front of a [DocumentCollection] implementation supplied by the caller.

pub mod base_repository;
pub mod collection;
pub mod find_options;
pub mod validation;

pub use base_repository::BaseRepository;
pub use collection::{DocumentCollection, IndexOptions, WriteResult};
pub use find_options::FindOptions;
pub use validation::{convert, ValidationOptions};
