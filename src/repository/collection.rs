use crate::document::Document;
use crate::errors::RepoResult;
use crate::repository::find_options::FindOptions;

/// Options for index creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexOptions {
    /// Whether the index enforces uniqueness across the collection.
    pub unique: bool,
}

impl IndexOptions {
    pub fn unique() -> IndexOptions {
        IndexOptions { unique: true }
    }
}

/// Outcome of a write operation as reported by the backing collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WriteResult {
    /// Documents matched by the filter of an update or delete.
    pub matched_count: u64,
    /// Documents actually modified by an update.
    pub modified_count: u64,
    /// Documents removed by a delete.
    pub deleted_count: u64,
    /// Identifiers of documents written by an insert, in input order.
    pub inserted_ids: Vec<crate::common::Value>,
}

impl WriteResult {
    pub fn inserted(ids: Vec<crate::common::Value>) -> WriteResult {
        WriteResult {
            inserted_ids: ids,
            ..WriteResult::default()
        }
    }
}

/// The driver-facing surface of a collection.
///
/// The repository never talks to a database directly; it prepares filters,
/// options and documents and hands them to an implementation of this trait.
/// Implementations are expected to be cheap to share, the repository holds
/// one behind an [std::sync::Arc] and index creation runs on a background
/// thread.
/// The raw `options` documents carry driver-level settings the repository
/// does not interpret (`skip`/`limit` on `count`, write-concern keys on
/// writes); they are passed through verbatim.
pub trait DocumentCollection: Send + Sync {
    /// Counts the documents matching the filter. The options may carry
    /// `skip` and `limit` to bound the count.
    fn count(&self, filter: Document, options: Document) -> RepoResult<u64>;

    /// Finds all documents matching the filter.
    fn find(&self, filter: Document, options: FindOptions) -> RepoResult<Vec<Document>>;

    /// Finds the first document matching the filter.
    fn find_one(&self, filter: Document, options: FindOptions) -> RepoResult<Option<Document>>;

    /// Inserts a single document.
    fn insert_one(&self, document: Document, options: Document) -> RepoResult<WriteResult>;

    /// Inserts a batch of documents.
    fn insert_many(&self, documents: Vec<Document>, options: Document) -> RepoResult<WriteResult>;

    /// Updates the first document matching the filter.
    fn update_one(
        &self,
        filter: Document,
        update: Document,
        options: Document,
    ) -> RepoResult<WriteResult>;

    /// Updates all documents matching the filter.
    fn update_many(
        &self,
        filter: Document,
        update: Document,
        options: Document,
    ) -> RepoResult<WriteResult>;

    /// Deletes the first document matching the filter.
    fn delete_one(&self, filter: Document, options: Document) -> RepoResult<WriteResult>;

    /// Deletes all documents matching the filter.
    fn delete_many(&self, filter: Document, options: Document) -> RepoResult<WriteResult>;

    /// Runs an aggregation pipeline.
    fn aggregate(&self, pipeline: &[Document], options: Document) -> RepoResult<Vec<Document>>;

    /// Creates an index with the given key specification.
    fn ensure_index(&self, spec: Document, options: IndexOptions) -> RepoResult<()>;
}
