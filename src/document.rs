use crate::common::Value;
use crate::errors::{ErrorKind, RepoError, RepoResult};
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt::{Debug, Display};

/// Represents a document: an insertion-ordered collection of key-value pairs.
///
/// Documents serve both as filter/selector documents for queries and as data
/// payloads for writes. The key is always a [String] and the value a [Value].
///
/// Keys are literal. A key containing a dot, such as `"a.aa"`, is a single
/// path-shaped key and is **not** expanded into nested documents, matching
/// filter-document semantics where `{"a.aa": 1}` addresses the field `aa`
/// inside `a` as one selector key. Nesting is expressed explicitly with
/// [Value::Document].
///
/// # Examples
///
/// ```rust,ignore
/// use baserepo::doc;
///
/// let filter = doc! {
///     "a.aa": "507f191e810c19729de860ea",
///     status: "active",
/// };
/// assert!(filter.contains_key("a.aa"));
/// ```
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top-level entries in the document.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key.
    ///
    /// If the key already exists its value is replaced in place, keeping the
    /// original insertion position.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> RepoResult<()> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(RepoError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        self.data.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Returns a reference to the value for the given key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns a mutable reference to the value for the given key, if present.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Removes the key and its value from the document. Removing a missing
    /// key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Checks if the given key exists in the document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns an iterator over the key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Returns the keys of the document in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub(crate) fn to_json_string(&self) -> String {
        format!(
            "{{{}}}",
            self.data
                .iter()
                .map(|(key, value)| format!("\"{}\": {}", key, value.to_json_string()))
                .join(", ")
        )
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Document {
            data: iter.into_iter().filter(|(k, _)| !k.is_empty()).collect(),
        }
    }
}

/// Strips the surrounding quotes a stringified macro key may carry.
pub fn normalize_key(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be bare identifiers or quoted strings; quoted keys allow dotted
/// paths (`"a.aa"`) and operator names (`"$or"`).
///
/// # Examples
///
/// ```rust
/// use baserepo::doc;
///
/// let empty = doc! {};
///
/// let filter = doc! {
///     userName: "wayne",
///     "a.aa": "507f191e810c19729de860ea",
///     "$or": [{ age: 30 }, { age: 35 }],
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::document::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::document::Document::new();
            $(
                doc.put(&$crate::document::normalize_key(stringify!($key)), $crate::doc_value!($value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the [doc!] macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, literal, function call, ...)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Value;

    #[test]
    fn test_new_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_put_and_get() {
        let mut doc = Document::new();
        doc.put("key", 1).unwrap();
        assert_eq!(doc.get("key"), Some(&Value::I32(1)));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn test_put_empty_key_fails() {
        let mut doc = Document::new();
        assert!(doc.put("", 1).is_err());
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut doc = doc! { first: 1, second: 2 };
        doc.put("first", 10).unwrap();
        assert_eq!(doc.get("first"), Some(&Value::I32(10)));
        assert_eq!(doc.keys().next().unwrap(), "first");
    }

    #[test]
    fn test_dotted_key_is_literal() {
        let doc = doc! { "a.aa": "507f191e810c19729de860ea" };
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_key("a.aa"));
        assert!(!doc.contains_key("a"));
    }

    #[test]
    fn test_remove() {
        let mut doc = doc! { key: 1 };
        assert_eq!(doc.remove("key"), Some(Value::I32(1)));
        assert_eq!(doc.remove("key"), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let doc = doc! { z: 1, a: 2, m: 3 };
        let keys: Vec<&String> = doc.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_macro_nested_documents_and_arrays() {
        let doc = doc! {
            user: {
                name: "wayne",
                tags: ["admin", "user"],
            },
            values: [1, 2, 3],
        };

        let user = doc.get("user").unwrap().as_document().unwrap();
        assert_eq!(user.get("name"), Some(&Value::String("wayne".to_string())));
        assert_eq!(
            doc.get("values"),
            Some(&Value::Array(vec![
                Value::I32(1),
                Value::I32(2),
                Value::I32(3)
            ]))
        );
    }

    #[test]
    fn test_macro_operator_keys() {
        let doc = doc! {
            "$or": [{ age: 30 }, { age: 35 }],
        };
        let or = doc.get("$or").unwrap().as_array().unwrap();
        assert_eq!(or.len(), 2);
        assert!(or[0].is_document());
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("\"a.aa\""), "a.aa");
        assert_eq!(normalize_key("plain"), "plain");
    }

    #[test]
    fn test_display_json() {
        let doc = doc! { name: "wayne", age: 30 };
        assert_eq!(format!("{}", doc), "{\"name\": \"wayne\", \"age\": 30}");
    }

    #[test]
    fn test_from_iterator() {
        let doc: Document = vec![
            ("a".to_string(), Value::I32(1)),
            ("b".to_string(), Value::I32(2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(doc.len(), 2);
    }
}
