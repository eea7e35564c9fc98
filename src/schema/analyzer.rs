use crate::common::{SortOrder, DEFAULT_KEY_FIELD, FIELD_SEPARATOR, MAX_SCHEMA_DEPTH};
use crate::document::Document;
use crate::query::sort::SortSpec;
use crate::schema::descriptor::{FieldSchema, Format, ObjectSchema, Schema, ScalarSchema};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// A request to create an index on the collection, derived from the schema's
/// `index`/`unique` attributes. Submitted fire-and-forget at repository
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRequest {
    /// Index key specification: field path mapped to its numeric direction.
    pub spec: Document,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

impl IndexRequest {
    fn single(path: &str, order: SortOrder, unique: bool) -> IndexRequest {
        let mut spec = Document::new();
        // the analyzer only visits named properties, so the path is never empty
        spec.put(path, order.direction())
            .expect("index path must be a non-empty key");
        IndexRequest { spec, unique }
    }
}

/// The metadata extracted from a schema description at construction time.
///
/// Built once by [analyze] and immutable afterwards; all query-time
/// normalization and sorting decisions read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaMetadata {
    id_fields: BTreeSet<String>,
    default_sort: SortSpec,
    key_field: String,
    index_requests: Vec<IndexRequest>,
}

impl SchemaMetadata {
    /// Dot-joined paths of identifier-like fields. Membership here is what
    /// makes the normalizer coerce string values to [crate::object_id::ObjectId].
    pub fn id_fields(&self) -> &BTreeSet<String> {
        &self.id_fields
    }

    /// The default sort used when a call supplies none.
    pub fn default_sort(&self) -> &SortSpec {
        &self.default_sort
    }

    /// The name of the field acting as primary key.
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// The index-creation requests derived from `index`/`unique` attributes.
    pub fn index_requests(&self) -> &[IndexRequest] {
        &self.index_requests
    }
}

/// Analyzes a schema description for sorting, identifier fields, the key
/// field and indexes.
///
/// Depth-first traversal carrying a dot-joined namespace prefix:
/// - object descriptors recurse into their properties with an extended prefix;
/// - array descriptors recurse into their item descriptor under the same
///   field name, so array hops add no path segment (matching query path
///   semantics, where `a.b` matches elements of an array at `a`);
/// - scalar descriptors register their format/sort/key/index attributes.
///
/// Duplicate identifier paths keep the first registration; when several
/// properties are marked `key`, the last one in traversal order wins. If no
/// property carries a `sort` attribute, the default sort falls back to the
/// key field ascending.
///
/// Nesting deeper than [MAX_SCHEMA_DEPTH] is skipped with a warning; the
/// remaining branches still produce best-effort metadata.
pub fn analyze(schema: &Schema) -> SchemaMetadata {
    let mut metadata = SchemaMetadata {
        id_fields: BTreeSet::new(),
        default_sort: SortSpec::new(),
        key_field: DEFAULT_KEY_FIELD.to_string(),
        index_requests: Vec::new(),
    };

    walk_properties(&schema.properties, "", 0, &mut metadata);

    // set default sorting
    if metadata.default_sort.is_empty() {
        let key_field = metadata.key_field.clone();
        metadata
            .default_sort
            .push_field(&key_field, SortOrder::Ascending);
    }

    metadata
}

fn walk_properties(
    properties: &IndexMap<String, FieldSchema>,
    namespace: &str,
    depth: usize,
    out: &mut SchemaMetadata,
) {
    for (name, property) in properties {
        let path = if namespace.is_empty() {
            name.clone()
        } else {
            format!("{}{}{}", namespace, FIELD_SEPARATOR, name)
        };
        walk_field(&path, property, depth + 1, out);
    }
}

fn walk_field(path: &str, field: &FieldSchema, depth: usize, out: &mut SchemaMetadata) {
    if depth > MAX_SCHEMA_DEPTH {
        log::warn!(
            "Schema nesting at {} exceeds the maximum depth of {}, skipping branch",
            path,
            MAX_SCHEMA_DEPTH
        );
        return;
    }

    match field {
        FieldSchema::Object(ObjectSchema { properties }) => {
            walk_properties(properties, path, depth, out);
        }
        // arrays never add a path segment
        FieldSchema::Array(array) => walk_field(path, &array.items, depth + 1, out),
        FieldSchema::Scalar(scalar) => register_scalar(path, scalar, out),
    }
}

fn register_scalar(path: &str, scalar: &ScalarSchema, out: &mut SchemaMetadata) {
    if scalar.format == Some(Format::MongoId) {
        // first write wins on duplicate paths
        out.id_fields.insert(path.to_string());
    }

    if let Some(order) = scalar.sort {
        out.default_sort.push_field(path, order);
    }

    if scalar.key {
        out.key_field = path.to_string();
    }

    if let Some(order) = scalar.index {
        out.index_requests
            .push(IndexRequest::single(path, order, false));
    }

    if scalar.unique {
        out.index_requests
            .push(IndexRequest::single(path, SortOrder::Ascending, true));
    }
}
