/// Default key field name used when no schema property is marked as key.
pub const DEFAULT_KEY_FIELD: &str = "_id";

/// Top-level keys that mark a lone document argument as an options object
/// rather than a filter. Mirrors the driver option names, including the
/// write-concern keys.
pub const OPTION_KEYS: [&str; 9] = [
    "fields", "sort", "skip", "limit", "w", "journal", "wtimeout", "single", "fsync",
];

/// Array-matching operators whose elements are converted one by one.
pub const ARRAY_OPERATORS: [&str; 3] = ["$in", "$all", "$nin"];

/// Negation operators whose value is converted only when it is a single
/// string; operator documents inside them are left alone.
pub const NEGATION_OPERATORS: [&str; 2] = ["$not", "$ne"];

/// Logical combinators whose value is an array of nested filter documents.
pub const LOGICAL_OPERATORS: [&str; 3] = ["$or", "$and", "$nor"];

/// Update operator holding the fields to set; the key field is stripped from
/// here first when present.
pub const SET_OPERATOR: &str = "$set";

/// Maximum schema nesting depth the analyzer will follow. Deeper branches are
/// skipped with a warning.
pub const MAX_SCHEMA_DEPTH: usize = 32;

/// Field separator for dot-joined namespaces produced by the analyzer.
pub const FIELD_SEPARATOR: &str = ".";
