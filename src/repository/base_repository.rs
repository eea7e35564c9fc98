use crate::common::{async_task, Value, SET_OPERATOR};
use crate::document::Document;
use crate::errors::{type_mismatch, ErrorKind, RepoError, RepoResult};
use crate::object_id::ObjectId;
use crate::query::args::QueryArgs;
use crate::query::normalizer::normalize_filter;
use crate::query::sort::SortSpec;
use crate::repository::collection::{DocumentCollection, IndexOptions, WriteResult};
use crate::repository::find_options::FindOptions;
use crate::repository::validation::ValidationOptions;
use crate::schema::analyzer::{analyze, SchemaMetadata};
use crate::schema::descriptor::Schema;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A thin repository over a [DocumentCollection].
///
/// Construction analyzes the schema once and submits the derived index
/// requests on a background thread; failures there are logged and never
/// surface to callers. Every read and write path first normalizes string
/// identifier values in the filter to native [ObjectId]s, so callers can
/// query with plain hex strings throughout.
pub struct BaseRepository<C> {
    collection: Arc<C>,
    schema: Schema,
    metadata: SchemaMetadata,
}

impl<C> BaseRepository<C>
where
    C: DocumentCollection + 'static,
{
    /// Creates a repository over the collection, driven by the schema.
    ///
    /// Index creation is fire-and-forget: each request derived from the
    /// schema's `index`/`unique` attributes runs on its own background
    /// thread, and an error is logged rather than returned.
    pub fn new(collection: Arc<C>, schema: &Schema) -> BaseRepository<C> {
        let metadata = analyze(schema);

        for request in metadata.index_requests() {
            let collection = collection.clone();
            let spec = request.spec.clone();
            let options = IndexOptions {
                unique: request.unique,
            };
            async_task(move || {
                if let Err(error) = collection.ensure_index(spec.clone(), options) {
                    log::error!("Failed to create index {}: {}", spec, error);
                }
            });
        }

        BaseRepository {
            collection,
            schema: schema.clone(),
            metadata,
        }
    }

    /// The backing collection.
    pub fn collection(&self) -> &Arc<C> {
        &self.collection
    }

    /// The schema this repository was constructed with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The metadata derived from the schema at construction.
    pub fn metadata(&self) -> &SchemaMetadata {
        &self.metadata
    }

    /// The name of the field acting as primary key.
    pub fn key_field(&self) -> &str {
        self.metadata.key_field()
    }

    /// Dot-joined paths of the schema's identifier fields.
    pub fn id_fields(&self) -> &BTreeSet<String> {
        self.metadata.id_fields()
    }

    /// The sort applied when a call supplies none.
    pub fn default_sort(&self) -> &SortSpec {
        self.metadata.default_sort()
    }

    /// Options for an external schema validator, wired to the format-aware
    /// conversion of this crate.
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::default()
    }

    /// Generates a fresh identifier.
    pub fn create_new_id(&self) -> ObjectId {
        ObjectId::new()
    }

    /// Converts between the wire and native identifier representations: a
    /// hex string parses into an [ObjectId] and an [ObjectId] renders to its
    /// hex string. Values of any other type pass through unchanged.
    pub fn convert_id(&self, id: Value) -> RepoResult<Value> {
        match id {
            Value::String(text) => {
                let parsed = ObjectId::parse_str(&text).map_err(|error| {
                    RepoError::new_with_cause(
                        &format!("Cannot convert id {}", text),
                        ErrorKind::InvalidId,
                        error,
                    )
                })?;
                Ok(Value::ObjectId(parsed))
            }
            Value::ObjectId(id) => Ok(Value::String(id.to_hex())),
            other => Ok(other),
        }
    }

    /// Counts the documents matching the call's filter. The options document
    /// reaches the collection verbatim, so `skip`/`limit` bound the count.
    pub fn count(&self, args: QueryArgs) -> RepoResult<u64> {
        let (filter, options) = self.resolve(args)?;
        self.collection.count(filter, options)
    }

    /// Finds all documents matching the call's filter, sorted by the call's
    /// sort or the schema default.
    pub fn find(&self, args: QueryArgs) -> RepoResult<Vec<Document>> {
        let (filter, options) = self.resolve(args)?;
        let options = FindOptions::from_document(&options, self.metadata.default_sort());
        self.collection.find(filter, options)
    }

    /// Finds the first document matching the call's filter.
    pub fn find_one(&self, args: QueryArgs) -> RepoResult<Option<Document>> {
        let (filter, options) = self.resolve(args)?;
        let options = FindOptions::from_document(&options, self.metadata.default_sort());
        self.collection.find_one(filter, options)
    }

    /// Finds the document whose key field equals the id.
    ///
    /// A string id must be valid hex; an [ObjectId] is used as is; any other
    /// type is a type mismatch naming the actual type. Only a `fields`
    /// projection is honored from the options; the key lookup needs no sort.
    pub fn find_one_by_id(&self, id: Value, options: Document) -> RepoResult<Option<Document>> {
        let id = match id {
            Value::String(text) => Value::ObjectId(ObjectId::parse_str(&text)?),
            Value::ObjectId(id) => Value::ObjectId(id),
            other => {
                return Err(type_mismatch(
                    "id",
                    other.type_name(),
                    "object-id or string",
                ))
            }
        };

        let mut filter = Document::new();
        filter.put(self.metadata.key_field(), id)?;
        let mut find_options = FindOptions::new();
        if let Some(fields) = options.get("fields") {
            find_options = find_options.with_fields(fields.clone());
        }
        self.collection.find_one(filter, find_options)
    }

    /// Inserts a single document.
    pub fn insert_one(&self, document: Document, options: Document) -> RepoResult<WriteResult> {
        self.collection.insert_one(document, options)
    }

    /// Inserts a batch of documents.
    pub fn insert_many(
        &self,
        documents: Vec<Document>,
        options: Document,
    ) -> RepoResult<WriteResult> {
        self.collection.insert_many(documents, options)
    }

    /// Updates the first document matching the filter.
    ///
    /// The filter is normalized and the key field is stripped from the
    /// update, from `$set` when present and from the top level otherwise, so
    /// an update can never move a document to a different key.
    pub fn update_one(
        &self,
        filter: Document,
        update: Document,
        options: Document,
    ) -> RepoResult<WriteResult> {
        let filter = normalize_filter(Some(filter), self.metadata.id_fields());
        let update = self.strip_key(update);
        self.collection.update_one(filter, update, options)
    }

    /// Updates all documents matching the filter, with the same filter
    /// normalization and key stripping as [BaseRepository::update_one].
    pub fn update_many(
        &self,
        filter: Document,
        update: Document,
        options: Document,
    ) -> RepoResult<WriteResult> {
        let filter = normalize_filter(Some(filter), self.metadata.id_fields());
        let update = self.strip_key(update);
        self.collection.update_many(filter, update, options)
    }

    /// Deletes the first document matching the call's filter.
    pub fn delete_one(&self, args: QueryArgs) -> RepoResult<WriteResult> {
        let (filter, options) = self.resolve(args)?;
        self.collection.delete_one(filter, options)
    }

    /// Deletes all documents matching the call's filter.
    pub fn delete_many(&self, args: QueryArgs) -> RepoResult<WriteResult> {
        let (filter, options) = self.resolve(args)?;
        self.collection.delete_many(filter, options)
    }

    /// Runs an aggregation pipeline. The pipeline must be an array of stage
    /// documents; anything else is a type mismatch naming the actual type.
    pub fn aggregate(&self, pipeline: Value, options: Document) -> RepoResult<Vec<Document>> {
        let stages = match pipeline {
            Value::Array(stages) => stages,
            other => return Err(type_mismatch("pipeline", other.type_name(), "array")),
        };

        let mut documents = Vec::with_capacity(stages.len());
        for stage in stages {
            match stage {
                Value::Document(document) => documents.push(document),
                other => {
                    return Err(type_mismatch(
                        "pipeline",
                        other.type_name(),
                        "array of objects",
                    ))
                }
            }
        }
        self.collection.aggregate(&documents, options)
    }

    /// Legacy insert spelling, accepting a single document or an array of
    /// documents.
    #[deprecated(note = "use insert_one or insert_many")]
    pub fn insert(&self, documents: Value) -> RepoResult<WriteResult> {
        log::warn!("insert is deprecated, use insert_one or insert_many");
        match documents {
            Value::Document(document) => self.insert_one(document, Document::new()),
            Value::Array(items) => {
                let mut documents = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Document(document) => documents.push(document),
                        other => {
                            return Err(type_mismatch(
                                "documents",
                                other.type_name(),
                                "object or array of objects",
                            ))
                        }
                    }
                }
                self.insert_many(documents, Document::new())
            }
            other => Err(type_mismatch(
                "documents",
                other.type_name(),
                "object or array of objects",
            )),
        }
    }

    #[deprecated(note = "use update_one or update_many")]
    pub fn update(&self, filter: Document, update: Document) -> RepoResult<WriteResult> {
        log::warn!("update is deprecated, use update_one or update_many");
        self.update_one(filter, update, Document::new())
    }

    /// Legacy remove spelling. `{single: true}` in the options deletes at
    /// most one document; anything else deletes every match.
    #[deprecated(note = "use delete_one or delete_many")]
    pub fn remove(&self, args: QueryArgs) -> RepoResult<WriteResult> {
        log::warn!("remove is deprecated, use delete_one or delete_many");
        let (filter, options) = self.resolve(args)?;
        if options.get("single").and_then(Value::as_bool) == Some(true) {
            self.collection.delete_one(filter, options)
        } else {
            self.collection.delete_many(filter, options)
        }
    }

    fn resolve(&self, args: QueryArgs) -> RepoResult<(Document, Document)> {
        let (filter, options) = args.resolve()?;
        let filter = normalize_filter(Some(filter), self.metadata.id_fields());
        Ok((filter, options))
    }

    fn strip_key(&self, mut update: Document) -> Document {
        match update.get_mut(SET_OPERATOR) {
            Some(Value::Document(set)) => {
                set.remove(self.metadata.key_field());
            }
            _ => {
                update.remove(self.metadata.key_field());
            }
        }
        update
    }
}
