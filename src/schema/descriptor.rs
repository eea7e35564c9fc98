use crate::common::SortOrder;
use indexmap::IndexMap;

/// The primitive type a scalar schema property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
}

/// The declared string format of a scalar property.
///
/// `MongoId` marks an identifier-like field: callers may supply it as a
/// string, but it is stored as the database-native [crate::object_id::ObjectId]
/// and the query normalizer coerces it on every call. The date formats are
/// consumed by the validation `convert` function; any other format passes
/// values through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    MongoId,
    Date,
    DateTime,
    Email,
}

impl Format {
    /// Returns the wire name of this format as it appears in schema
    /// descriptions and is passed to the validation convert function.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::MongoId => "mongo-id",
            Format::Date => "date",
            Format::DateTime => "date-time",
            Format::Email => "email",
        }
    }

    /// Looks up a format by its wire name.
    pub fn parse(name: &str) -> Option<Format> {
        match name {
            "mongo-id" => Some(Format::MongoId),
            "date" => Some(Format::Date),
            "date-time" => Some(Format::DateTime),
            "email" => Some(Format::Email),
            _ => None,
        }
    }
}

/// A scalar property descriptor.
///
/// Carries the attributes the analyzer extracts: `format` (identifier
/// marking), `sort` (contribution to the default sort), `key` (primary key
/// marker), `index`/`unique` (index-creation requests). `required` is kept
/// for the external validation collaborator and is not interpreted here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarSchema {
    pub field_type: FieldType,
    pub format: Option<Format>,
    pub required: bool,
    pub sort: Option<SortOrder>,
    pub key: bool,
    pub index: Option<SortOrder>,
    pub unique: bool,
}

impl ScalarSchema {
    /// Creates a scalar descriptor of the given type with no attributes set.
    pub fn of(field_type: FieldType) -> ScalarSchema {
        ScalarSchema {
            field_type,
            format: None,
            required: false,
            sort: None,
            key: false,
            index: None,
            unique: false,
        }
    }

    pub fn format(mut self, format: Format) -> ScalarSchema {
        self.format = Some(format);
        self
    }

    pub fn required(mut self) -> ScalarSchema {
        self.required = true;
        self
    }

    /// Registers this property in the default sort with the given order.
    pub fn sort(mut self, order: SortOrder) -> ScalarSchema {
        self.sort = Some(order);
        self
    }

    /// Marks this property as the key field. At most one property should be
    /// marked; when several are, the last one in traversal order wins and no
    /// validation is performed.
    pub fn key(mut self) -> ScalarSchema {
        self.key = true;
        self
    }

    /// Requests a non-unique index on this property.
    pub fn index(mut self, order: SortOrder) -> ScalarSchema {
        self.index = Some(order);
        self
    }

    /// Requests a unique index on this property.
    pub fn unique(mut self) -> ScalarSchema {
        self.unique = true;
        self
    }
}

/// An object property descriptor holding nested properties.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSchema {
    pub properties: IndexMap<String, FieldSchema>,
}

impl ObjectSchema {
    pub fn new() -> ObjectSchema {
        ObjectSchema {
            properties: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: &str, schema: impl Into<FieldSchema>) -> ObjectSchema {
        self.properties.insert(name.to_string(), schema.into());
        self
    }
}

/// An array property descriptor. The item descriptor may itself be a scalar,
/// an object or another array; array hops never contribute a path segment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArraySchema {
    pub items: Box<FieldSchema>,
}

impl ArraySchema {
    pub fn of(items: impl Into<FieldSchema>) -> ArraySchema {
        ArraySchema {
            items: Box::new(items.into()),
        }
    }
}

/// A property descriptor: scalar, nested object or array of items.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldSchema {
    Scalar(ScalarSchema),
    Object(ObjectSchema),
    Array(ArraySchema),
}

impl From<ScalarSchema> for FieldSchema {
    fn from(schema: ScalarSchema) -> Self {
        FieldSchema::Scalar(schema)
    }
}

impl From<ObjectSchema> for FieldSchema {
    fn from(schema: ObjectSchema) -> Self {
        FieldSchema::Object(schema)
    }
}

impl From<ArraySchema> for FieldSchema {
    fn from(schema: ArraySchema) -> Self {
        FieldSchema::Array(schema)
    }
}

/// A declarative schema description for a collection.
///
/// An ordered mapping from field name to a property descriptor. Descriptors
/// nest to arbitrary depth; the analyzer derives dot-joined field paths from
/// the nesting.
///
/// # Examples
///
/// ```rust,ignore
/// use baserepo::schema::{Schema, ScalarSchema, FieldType, Format};
/// use baserepo::common::SortOrder;
///
/// let schema = Schema::new()
///     .field("_id", ScalarSchema::of(FieldType::String).format(Format::MongoId).key())
///     .field("userName", ScalarSchema::of(FieldType::String)
///         .required()
///         .sort(SortOrder::Ascending)
///         .unique());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    pub properties: IndexMap<String, FieldSchema>,
}

impl Schema {
    pub fn new() -> Schema {
        Schema {
            properties: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: &str, schema: impl Into<FieldSchema>) -> Schema {
        self.properties.insert(name.to_string(), schema.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wire_names_round_trip() {
        for format in [Format::MongoId, Format::Date, Format::DateTime, Format::Email] {
            assert_eq!(Format::parse(format.as_str()), Some(format));
        }
        assert_eq!(Format::parse("unknown"), None);
    }

    #[test]
    fn test_scalar_builder() {
        let scalar = ScalarSchema::of(FieldType::String)
            .format(Format::MongoId)
            .required()
            .key();
        assert_eq!(scalar.field_type, FieldType::String);
        assert_eq!(scalar.format, Some(Format::MongoId));
        assert!(scalar.required);
        assert!(scalar.key);
        assert!(!scalar.unique);
    }

    #[test]
    fn test_schema_preserves_field_order() {
        let schema = Schema::new()
            .field("z", ScalarSchema::of(FieldType::String))
            .field("a", ScalarSchema::of(FieldType::Integer));
        let names: Vec<&String> = schema.properties.keys().collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_nested_descriptors() {
        let schema = Schema::new().field(
            "elem",
            ArraySchema::of(ObjectSchema::new().field(
                "cc",
                ScalarSchema::of(FieldType::String).format(Format::MongoId),
            )),
        );

        match schema.properties.get("elem") {
            Some(FieldSchema::Array(array)) => match array.items.as_ref() {
                FieldSchema::Object(object) => {
                    assert!(object.properties.contains_key("cc"));
                }
                other => panic!("expected object items, got {:?}", other),
            },
            other => panic!("expected array descriptor, got {:?}", other),
        }
    }
}
