use crate::common::{SortOrder, Value};
use crate::document::Document;

/// An ordered sort specification: field names paired with sort directions.
///
/// The pairs keep their order, which a plain mapping cannot guarantee for
/// multi-key sorts; the collection receives the keys in exactly this order.
/// `push_field` has mapping override semantics: pushing an existing field
/// replaces its direction in place without moving it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortSpec {
    fields: Vec<(String, SortOrder)>,
}

impl SortSpec {
    pub fn new() -> SortSpec {
        SortSpec { fields: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Adds a field with the given direction. A field already present keeps
    /// its position and gets the new direction.
    pub fn push_field(&mut self, name: &str, order: SortOrder) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = order,
            None => self.fields.push((name.to_string(), order)),
        }
    }

    /// Returns the ordered field/direction pairs.
    pub fn fields(&self) -> &[(String, SortOrder)] {
        &self.fields
    }
}

impl From<Vec<(&str, SortOrder)>> for SortSpec {
    fn from(pairs: Vec<(&str, SortOrder)>) -> Self {
        let mut spec = SortSpec::new();
        for (name, order) in pairs {
            spec.push_field(name, order);
        }
        spec
    }
}

/// Resolves a caller-supplied sort value into a [SortSpec].
///
/// Accepted shapes:
/// - no value (`Null`) or an empty string: the schema-derived default sort;
/// - a string: ascending sort on that single field;
/// - an array of strings: ascending sort on each, in the given order, later
///   duplicates overriding earlier entries;
/// - an array of `[name, direction]` pairs: an ordered multi-key sort taken
///   in sequence order (negative direction sorts descending);
/// - a document mapping field to direction: taken in document order.
///
/// Anything else resolves to `None`; the collection treats the absence of a
/// sort as "no ordering requested".
pub fn resolve_sort(value: &Value, default_sort: &SortSpec) -> Option<SortSpec> {
    match value {
        // return default sort
        Value::Null => Some(default_sort.clone()),
        Value::String(s) if s.is_empty() => Some(default_sort.clone()),

        // sort by the given string ascending, e.g. "name"
        Value::String(s) => {
            let mut spec = SortSpec::new();
            spec.push_field(s, SortOrder::Ascending);
            Some(spec)
        }

        Value::Array(items) => {
            if let Some(Value::Array(_)) = items.first() {
                // sort by pair array, e.g. [["name", 1], ["city", -1]]
                Some(resolve_pair_array(items))
            } else {
                // sort by the strings in the array ascending, e.g. ["name", "city"]
                let mut spec = SortSpec::new();
                for item in items {
                    if let Value::String(name) = item {
                        spec.push_field(name, SortOrder::Ascending);
                    }
                }
                Some(spec)
            }
        }

        // sort by mapping, e.g. {name: 1, city: -1}
        Value::Document(mapping) => Some(resolve_mapping(mapping)),

        _ => None,
    }
}

fn resolve_pair_array(items: &[Value]) -> SortSpec {
    let mut spec = SortSpec::new();
    for item in items {
        let Value::Array(pair) = item else { continue };
        let (Some(Value::String(name)), Some(direction)) = (pair.first(), pair.get(1)) else {
            continue;
        };
        if let Some(direction) = direction.as_i64() {
            spec.push_field(name, SortOrder::from_direction(direction));
        }
    }
    spec
}

fn resolve_mapping(mapping: &Document) -> SortSpec {
    let mut spec = SortSpec::new();
    for (name, direction) in mapping.iter() {
        if let Some(direction) = direction.as_i64() {
            spec.push_field(name, SortOrder::from_direction(direction));
        }
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    fn default_sort() -> SortSpec {
        SortSpec::from(vec![("userName", SortOrder::Ascending)])
    }

    #[test]
    fn test_no_value_returns_default() {
        let resolved = resolve_sort(&Value::Null, &default_sort()).unwrap();
        assert_eq!(resolved, default_sort());
    }

    #[test]
    fn test_empty_string_returns_default() {
        let resolved = resolve_sort(&Value::from(""), &default_sort()).unwrap();
        assert_eq!(resolved, default_sort());
    }

    #[test]
    fn test_string_sorts_ascending() {
        let resolved = resolve_sort(&Value::from("name"), &default_sort()).unwrap();
        assert_eq!(resolved, SortSpec::from(vec![("name", SortOrder::Ascending)]));
    }

    #[test]
    fn test_string_array_sorts_each_ascending() {
        let value = Value::Array(vec![Value::from("name"), Value::from("age")]);
        let resolved = resolve_sort(&value, &default_sort()).unwrap();
        assert_eq!(
            resolved,
            SortSpec::from(vec![
                ("name", SortOrder::Ascending),
                ("age", SortOrder::Ascending)
            ])
        );
    }

    #[test]
    fn test_string_array_skips_non_strings() {
        let value = Value::Array(vec![Value::from("name"), Value::I32(5)]);
        let resolved = resolve_sort(&value, &default_sort()).unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_pair_array_preserves_order_and_direction() {
        let value = Value::Array(vec![
            Value::Array(vec![Value::from("name"), Value::I32(1)]),
            Value::Array(vec![Value::from("age"), Value::I32(-1)]),
        ]);
        let resolved = resolve_sort(&value, &default_sort()).unwrap();
        assert_eq!(
            resolved.fields(),
            &[
                ("name".to_string(), SortOrder::Ascending),
                ("age".to_string(), SortOrder::Descending)
            ]
        );
    }

    #[test]
    fn test_pair_array_skips_malformed_pairs() {
        let value = Value::Array(vec![
            Value::Array(vec![Value::from("name"), Value::I32(1)]),
            Value::Array(vec![Value::I32(3)]),
            Value::Array(vec![Value::from("city"), Value::from("not-a-direction")]),
        ]);
        let resolved = resolve_sort(&value, &default_sort()).unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_mapping_taken_in_document_order() {
        let value = Value::Document(doc! { name: 1, city: (-1) });
        let resolved = resolve_sort(&value, &default_sort()).unwrap();
        assert_eq!(
            resolved.fields(),
            &[
                ("name".to_string(), SortOrder::Ascending),
                ("city".to_string(), SortOrder::Descending)
            ]
        );
    }

    #[test]
    fn test_other_values_resolve_to_none() {
        assert!(resolve_sort(&Value::I32(1), &default_sort()).is_none());
        assert!(resolve_sort(&Value::Bool(true), &default_sort()).is_none());
    }

    #[test]
    fn test_push_field_overrides_in_place() {
        let mut spec = SortSpec::new();
        spec.push_field("name", SortOrder::Ascending);
        spec.push_field("age", SortOrder::Ascending);
        spec.push_field("name", SortOrder::Descending);
        assert_eq!(
            spec.fields(),
            &[
                ("name".to_string(), SortOrder::Descending),
                ("age".to_string(), SortOrder::Ascending)
            ]
        );
    }
}
