use crate::common::{Value, ARRAY_OPERATORS, LOGICAL_OPERATORS, NEGATION_OPERATORS};
use crate::document::Document;
use crate::object_id::ObjectId;
use std::collections::BTreeSet;

/// Rewrites string identifier values in a filter to native
/// [ObjectId]s so that queries written with plain hex strings match stored
/// documents.
///
/// Takes ownership of the filter and returns the normalized document; a
/// missing filter yields an empty one. Only keys that literally equal an
/// identifier path from the schema metadata are touched, so a filter key
/// `"a.aa"` is matched as a whole against the analyzer's dot-joined paths.
///
/// For an identifier key the value is coerced when it is:
/// - a plain string;
/// - an operator document carrying `$in`, `$all` or `$nin` with an array of
///   strings (elements converted one by one);
/// - an operator document carrying `$not` or `$ne` with a single string.
///
/// The logical combinators `$or`, `$and` and `$nor` recurse into each nested
/// filter document. Strings that are not valid 24-character hex are left
/// untouched; normalization itself never fails.
pub fn normalize_filter(filter: Option<Document>, id_fields: &BTreeSet<String>) -> Document {
    match filter {
        Some(mut filter) => {
            normalize_in_place(&mut filter, id_fields);
            filter
        }
        None => Document::new(),
    }
}

fn normalize_in_place(filter: &mut Document, id_fields: &BTreeSet<String>) {
    let keys = filter.keys().cloned().collect::<Vec<_>>();
    for key in keys {
        if id_fields.contains(&key) {
            if let Some(value) = filter.get_mut(&key) {
                coerce_id_value(value);
            }
        } else if LOGICAL_OPERATORS.contains(&key.as_str()) {
            if let Some(Value::Array(branches)) = filter.get_mut(&key) {
                for branch in branches {
                    if let Value::Document(nested) = branch {
                        normalize_in_place(nested, id_fields);
                    }
                }
            }
        }
    }
}

fn coerce_id_value(value: &mut Value) {
    match value {
        Value::String(_) => coerce_string(value),
        Value::Document(operators) => {
            for op in ARRAY_OPERATORS {
                if let Some(Value::Array(items)) = operators.get_mut(op) {
                    for item in items {
                        coerce_string(item);
                    }
                }
            }
            for op in NEGATION_OPERATORS {
                if let Some(item) = operators.get_mut(op) {
                    coerce_string(item);
                }
            }
        }
        _ => {}
    }
}

// replaces a string value with the parsed id, leaving anything else untouched
fn coerce_string(value: &mut Value) {
    if let Value::String(text) = value {
        match ObjectId::parse_str(text) {
            Ok(id) => *value = Value::ObjectId(id),
            Err(error) => log::debug!("Leaving id value untouched: {}", error),
        }
    }
}
