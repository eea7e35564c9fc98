use crate::common::Value;
use crate::object_id::ObjectId;
use crate::schema::descriptor::Format;
use chrono::{DateTime, NaiveDate, Utc};

/// Conversion function handed to an external schema validator. Maps a wire
/// format name and a raw value to the stored representation.
pub type ConvertFn = fn(&str, Value) -> Value;

/// Options a repository hands to an external schema validator.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Remove properties the schema does not declare before writing.
    pub drop_unknown_fields: bool,
    /// Trim surrounding whitespace from string values.
    pub trim_strings: bool,
    /// Treat missing required properties as validation errors.
    pub strict_required: bool,
    /// Format-aware conversion applied to string values.
    pub convert: ConvertFn,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        ValidationOptions {
            drop_unknown_fields: true,
            trim_strings: true,
            strict_required: true,
            convert,
        }
    }
}

/// Converts a string value according to its declared schema format.
///
/// Only string values are converted; everything else passes through, as does
/// a string that fails to parse for its format or a format with no native
/// representation.
///
/// - `mongo-id` parses into an [ObjectId];
/// - `date-time` parses RFC 3339 into a UTC timestamp;
/// - `date` parses RFC 3339 or a plain `YYYY-MM-DD` day at midnight UTC.
pub fn convert(format: &str, value: Value) -> Value {
    let Value::String(text) = &value else {
        return value;
    };

    match Format::parse(format) {
        Some(Format::MongoId) => match ObjectId::parse_str(text) {
            Ok(id) => Value::ObjectId(id),
            Err(_) => value,
        },
        Some(Format::DateTime) => match DateTime::parse_from_rfc3339(text) {
            Ok(instant) => Value::DateTime(instant.with_timezone(&Utc)),
            Err(_) => value,
        },
        Some(Format::Date) => match parse_date(text) {
            Some(instant) => Value::DateTime(instant),
            None => value,
        },
        _ => value,
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_mongo_id_strings_are_parsed() {
        let converted = convert("mongo-id", Value::from("507f1f77bcf86cd799439011"));
        assert!(converted.is_object_id());
    }

    #[test]
    fn test_invalid_mongo_id_passes_through() {
        let converted = convert("mongo-id", Value::from("nope"));
        assert_eq!(converted, Value::from("nope"));
    }

    #[test]
    fn test_non_strings_pass_through() {
        assert_eq!(convert("mongo-id", Value::I32(5)), Value::I32(5));
        assert_eq!(convert("date-time", Value::Null), Value::Null);
    }

    #[test]
    fn test_date_time_parses_rfc3339() {
        let converted = convert("date-time", Value::from("1979-03-01T15:30:00Z"));
        let instant = converted.as_date_time().unwrap();
        assert_eq!(instant.year(), 1979);
        assert_eq!(instant.hour(), 15);
    }

    #[test]
    fn test_date_parses_plain_day() {
        let converted = convert("date", Value::from("1979-03-01"));
        let instant = converted.as_date_time().unwrap();
        assert_eq!(instant.month(), 3);
        assert_eq!(instant.hour(), 0);
    }

    #[test]
    fn test_unparseable_dates_pass_through() {
        assert_eq!(
            convert("date-time", Value::from("yesterday")),
            Value::from("yesterday")
        );
    }

    #[test]
    fn test_unknown_formats_pass_through() {
        assert_eq!(
            convert("email", Value::from("a@b.c")),
            Value::from("a@b.c")
        );
        assert_eq!(
            convert("frobnicate", Value::from("x")),
            Value::from("x")
        );
    }

    #[test]
    fn test_default_options() {
        let options = ValidationOptions::default();
        assert!(options.drop_unknown_fields);
        assert!(options.trim_strings);
        assert!(options.strict_required);
        let converted = (options.convert)("mongo-id", Value::from("507f1f77bcf86cd799439011"));
        assert!(converted.is_object_id());
    }
}
