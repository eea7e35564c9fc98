use crate::common::Value;
use crate::document::Document;
use crate::query::sort::{resolve_sort, SortSpec};

/// Options controlling a find operation.
///
/// Built from a raw options document and the repository's default sort; the
/// write-concern keys callers may pass (`w`, `journal`, `wtimeout`, `single`,
/// `fsync`) only matter for call-shape classification and are dropped here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FindOptions {
    fields: Option<Value>,
    sort: SortSpec,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl FindOptions {
    pub fn new() -> FindOptions {
        FindOptions::default()
    }

    /// Extracts find options from a raw options document.
    ///
    /// A missing or empty `sort` entry falls back to the default sort; a
    /// `sort` entry of an unsupported shape yields no sorting at all.
    /// Negative `skip`/`limit` values are ignored.
    pub fn from_document(options: &Document, default_sort: &SortSpec) -> FindOptions {
        let sort_value = options.get("sort").cloned().unwrap_or(Value::Null);
        let sort = resolve_sort(&sort_value, default_sort).unwrap_or_default();

        FindOptions {
            fields: options.get("fields").cloned(),
            sort,
            skip: positive_count(options.get("skip")),
            limit: positive_count(options.get("limit")),
        }
    }

    pub fn with_fields(mut self, fields: Value) -> FindOptions {
        self.fields = Some(fields);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> FindOptions {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> FindOptions {
        self.limit = Some(limit);
        self
    }

    pub fn with_skip(mut self, skip: u64) -> FindOptions {
        self.skip = Some(skip);
        self
    }

    /// Field projection, passed through to the driver unchanged.
    pub fn fields(&self) -> Option<&Value> {
        self.fields.as_ref()
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn skip(&self) -> Option<u64> {
        self.skip
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }
}

fn positive_count(value: Option<&Value>) -> Option<u64> {
    value
        .and_then(|v| v.as_i64())
        .filter(|count| *count >= 0)
        .map(|count| count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SortOrder;
    use crate::doc;

    fn default_sort() -> SortSpec {
        SortSpec::from(vec![("userName", SortOrder::Ascending)])
    }

    #[test]
    fn test_empty_options_use_default_sort() {
        let options = FindOptions::from_document(&doc! {}, &default_sort());
        assert_eq!(options.sort(), &default_sort());
        assert_eq!(options.skip(), None);
        assert_eq!(options.limit(), None);
        assert!(options.fields().is_none());
    }

    #[test]
    fn test_sort_string_overrides_default() {
        let options = FindOptions::from_document(&doc! { sort: "age" }, &default_sort());
        assert_eq!(
            options.sort(),
            &SortSpec::from(vec![("age", SortOrder::Ascending)])
        );
    }

    #[test]
    fn test_unsupported_sort_shape_yields_no_sorting() {
        let options = FindOptions::from_document(&doc! { sort: 42 }, &default_sort());
        assert!(options.sort().is_empty());
    }

    #[test]
    fn test_skip_and_limit_are_extracted() {
        let options =
            FindOptions::from_document(&doc! { skip: 5, limit: 10 }, &default_sort());
        assert_eq!(options.skip(), Some(5));
        assert_eq!(options.limit(), Some(10));
    }

    #[test]
    fn test_negative_counts_are_ignored() {
        let options =
            FindOptions::from_document(&doc! { skip: (-1), limit: (-5) }, &default_sort());
        assert_eq!(options.skip(), None);
        assert_eq!(options.limit(), None);
    }

    #[test]
    fn test_fields_pass_through() {
        let options = FindOptions::from_document(
            &doc! { fields: ["userName", "age"] },
            &default_sort(),
        );
        assert!(options.fields().is_some());
    }
}
