use crate::common::{Value, OPTION_KEYS};
use crate::document::Document;
use crate::errors::{type_mismatch, RepoResult};

/// The call shape of a read operation.
///
/// Callers may supply nothing, a single document, or an explicit
/// filter/options pair. A single document is classified by its top-level
/// keys: if any of them is a driver option name it is treated as an options
/// document and the filter stays empty, otherwise it is the filter.
///
/// Carrying [Value] instead of [Document] keeps the shape mistakes callers
/// can make representable, so a non-document argument resolves to a type
/// mismatch naming the actual type instead of being silently dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryArgs {
    #[default]
    None,
    Single(Value),
    Full {
        filter: Value,
        options: Value,
    },
}

impl QueryArgs {
    /// Resolves the call shape into a `(filter, options)` pair of documents.
    pub fn resolve(self) -> RepoResult<(Document, Document)> {
        match self {
            QueryArgs::None => Ok((Document::new(), Document::new())),
            QueryArgs::Single(value) => {
                let document = into_document(value, "query")?;
                if is_options_document(&document) {
                    Ok((Document::new(), document))
                } else {
                    Ok((document, Document::new()))
                }
            }
            QueryArgs::Full { filter, options } => {
                let filter = into_document(filter, "query")?;
                let options = into_document(options, "options")?;
                Ok((filter, options))
            }
        }
    }
}

impl From<()> for QueryArgs {
    fn from(_: ()) -> Self {
        QueryArgs::None
    }
}

impl From<Value> for QueryArgs {
    fn from(value: Value) -> Self {
        QueryArgs::Single(value)
    }
}

impl From<Document> for QueryArgs {
    fn from(filter: Document) -> Self {
        QueryArgs::Single(Value::Document(filter))
    }
}

impl From<(Document, Document)> for QueryArgs {
    fn from((filter, options): (Document, Document)) -> Self {
        QueryArgs::Full {
            filter: Value::Document(filter),
            options: Value::Document(options),
        }
    }
}

fn into_document(value: Value, param: &str) -> RepoResult<Document> {
    match value {
        Value::Document(document) => Ok(document),
        other => Err(type_mismatch(param, other.type_name(), "object")),
    }
}

// classification is by intersection with the option whitelist, so a document
// mixing option and filter keys counts as options
fn is_options_document(document: &Document) -> bool {
    document.keys().any(|key| OPTION_KEYS.contains(&key.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::errors::ErrorKind;

    #[test]
    fn test_no_args_resolve_to_empty_pair() {
        let (filter, options) = QueryArgs::None.resolve().unwrap();
        assert!(filter.is_empty());
        assert!(options.is_empty());
    }

    #[test]
    fn test_single_document_without_option_keys_is_a_filter() {
        let args = QueryArgs::from(doc! { userName: "wayne" });
        let (filter, options) = args.resolve().unwrap();
        assert_eq!(filter.get("userName"), Some(&Value::from("wayne")));
        assert!(options.is_empty());
    }

    #[test]
    fn test_single_document_with_option_keys_is_options() {
        for key in OPTION_KEYS {
            let mut document = Document::new();
            document.put(key, 1).unwrap();
            let (filter, options) = QueryArgs::Single(Value::Document(document))
                .resolve()
                .unwrap();
            assert!(filter.is_empty());
            assert!(options.contains_key(key));
        }
    }

    #[test]
    fn test_mixed_document_counts_as_options() {
        let args = QueryArgs::from(doc! { userName: "wayne", limit: 10 });
        let (filter, options) = args.resolve().unwrap();
        assert!(filter.is_empty());
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_single_non_document_is_a_type_mismatch() {
        let result = QueryArgs::Single(Value::from("oops")).resolve();
        let error = result.unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::TypeMismatch);
        assert_eq!(
            error.message(),
            "Param \"query\" is of type string! Type object expected"
        );
    }

    #[test]
    fn test_full_shape_validates_both_parts() {
        let result = QueryArgs::Full {
            filter: Value::from(5),
            options: Value::Document(Document::new()),
        }
        .resolve();
        assert!(result.unwrap_err().message().contains("\"query\""));

        let result = QueryArgs::Full {
            filter: Value::Document(Document::new()),
            options: Value::from(5),
        }
        .resolve();
        assert!(result.unwrap_err().message().contains("\"options\""));
    }

    #[test]
    fn test_full_shape_passes_documents_through() {
        let args = QueryArgs::from((doc! { age: 30 }, doc! { limit: 5 }));
        let (filter, options) = args.resolve().unwrap();
        assert_eq!(filter.get("age"), Some(&Value::I32(30)));
        assert_eq!(options.get("limit"), Some(&Value::I32(5)));
    }
}
