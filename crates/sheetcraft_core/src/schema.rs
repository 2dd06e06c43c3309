//! Schema descriptors for structured generation.
//!
//! A [`SchemaDescriptor`] is sent to the remote generator as an instruction
//! and, once the response has been repaired, used to check the shape of what
//! came back. Validation is structural: types, required fields and string
//! enumerations. Unknown object fields are tolerated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use sheetcraft_error::{FormatError, FormatErrorKind};
use std::collections::{BTreeMap, BTreeSet};

/// Primitive value kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    /// UTF-8 string
    String,
    /// Whole number
    Integer,
    /// Any JSON number
    Number,
    /// `true` or `false`
    Boolean,
}

impl PrimitiveKind {
    fn remote_type(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "STRING",
            PrimitiveKind::Integer => "INTEGER",
            PrimitiveKind::Number => "NUMBER",
            PrimitiveKind::Boolean => "BOOLEAN",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            PrimitiveKind::String => value.is_string(),
            PrimitiveKind::Number => value.is_number(),
            PrimitiveKind::Boolean => value.is_boolean(),
            PrimitiveKind::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
            }
        }
    }
}

/// Expected shape of a generation result.
///
/// # Examples
///
/// ```
/// use sheetcraft_core::SchemaDescriptor;
/// use serde_json::json;
///
/// let schema = SchemaDescriptor::array(
///     SchemaDescriptor::object()
///         .required("title", SchemaDescriptor::string())
///         .optional("hint", SchemaDescriptor::string())
///         .build(),
/// );
///
/// assert!(schema.validate(&json!([{"title": "Farm animals"}])).is_ok());
/// assert!(schema.validate(&json!([{"hint": "no title"}])).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaDescriptor {
    /// JSON object with named fields
    Object {
        /// Field schemas by name
        fields: BTreeMap<String, SchemaDescriptor>,
        /// Names that must be present
        required: BTreeSet<String>,
    },
    /// Homogeneous JSON array
    Array {
        /// Schema of every item
        items: Box<SchemaDescriptor>,
    },
    /// Scalar value
    Primitive {
        /// Scalar kind
        primitive: PrimitiveKind,
        /// Allowed string values, if restricted
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enum_values: Option<BTreeSet<String>>,
        /// Whether `null` is accepted
        #[serde(default)]
        nullable: bool,
    },
}

impl SchemaDescriptor {
    fn primitive(primitive: PrimitiveKind) -> Self {
        SchemaDescriptor::Primitive {
            primitive,
            enum_values: None,
            nullable: false,
        }
    }

    /// String primitive.
    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    /// Integer primitive.
    pub fn integer() -> Self {
        Self::primitive(PrimitiveKind::Integer)
    }

    /// Number primitive.
    pub fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    /// Boolean primitive.
    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    /// String restricted to the given values.
    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchemaDescriptor::Primitive {
            primitive: PrimitiveKind::String,
            enum_values: Some(values.into_iter().map(Into::into).collect()),
            nullable: false,
        }
    }

    /// Array of `items`.
    pub fn array(items: SchemaDescriptor) -> Self {
        SchemaDescriptor::Array {
            items: Box::new(items),
        }
    }

    /// Start building an object schema.
    pub fn object() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }

    /// Mark a primitive as accepting `null`. No effect on objects and arrays.
    pub fn nullable(mut self) -> Self {
        if let SchemaDescriptor::Primitive { nullable, .. } = &mut self {
            *nullable = true;
        }
        self
    }

    /// Render in the remote service's schema dialect.
    ///
    /// This is the form carried by both the relay body and the direct call's
    /// `responseSchema`.
    pub fn to_remote_schema(&self) -> Value {
        match self {
            SchemaDescriptor::Object { fields, required } => {
                let properties: Map<String, Value> = fields
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_remote_schema()))
                    .collect();
                let mut out = json!({
                    "type": "OBJECT",
                    "properties": properties,
                });
                if !required.is_empty() {
                    out["required"] = json!(required.iter().collect::<Vec<_>>());
                }
                out
            }
            SchemaDescriptor::Array { items } => json!({
                "type": "ARRAY",
                "items": items.to_remote_schema(),
            }),
            SchemaDescriptor::Primitive {
                primitive,
                enum_values,
                nullable,
            } => {
                let mut out = json!({ "type": primitive.remote_type() });
                if let Some(values) = enum_values {
                    out["enum"] = json!(values.iter().collect::<Vec<_>>());
                }
                if *nullable {
                    out["nullable"] = json!(true);
                }
                out
            }
        }
    }

    /// Check `value` against this descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`FormatErrorKind::SchemaMismatch`] naming the first offending
    /// path.
    pub fn validate(&self, value: &Value) -> Result<(), FormatError> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), FormatError> {
        match self {
            SchemaDescriptor::Object { fields, required } => {
                let Some(object) = value.as_object() else {
                    return Err(mismatch(path, "object", value));
                };
                for name in required {
                    if !object.contains_key(name) {
                        return Err(FormatError::new(FormatErrorKind::SchemaMismatch {
                            path: format!("{}.{}", path, name),
                            expected: "required field".to_string(),
                            found: "nothing".to_string(),
                        }));
                    }
                }
                for (name, field_value) in object {
                    if let Some(schema) = fields.get(name) {
                        schema.validate_at(&format!("{}.{}", path, name), field_value)?;
                    }
                }
                Ok(())
            }
            SchemaDescriptor::Array { items } => {
                let Some(array) = value.as_array() else {
                    return Err(mismatch(path, "array", value));
                };
                for (index, item) in array.iter().enumerate() {
                    items.validate_at(&format!("{}[{}]", path, index), item)?;
                }
                Ok(())
            }
            SchemaDescriptor::Primitive {
                primitive,
                enum_values,
                nullable,
            } => {
                if value.is_null() {
                    return if *nullable {
                        Ok(())
                    } else {
                        Err(mismatch(path, &primitive.to_string(), value))
                    };
                }
                if !primitive.accepts(value) {
                    return Err(mismatch(path, &primitive.to_string(), value));
                }
                match (enum_values, value.as_str()) {
                    (Some(allowed), Some(text)) if !allowed.contains(text) => {
                        Err(FormatError::new(FormatErrorKind::SchemaMismatch {
                            path: path.to_string(),
                            expected: format!("one of {:?}", allowed),
                            found: format!("\"{}\"", text),
                        }))
                    }
                    _ => Ok(()),
                }
            }
        }
    }
}

#[track_caller]
fn mismatch(path: &str, expected: &str, found: &Value) -> FormatError {
    FormatError::new(FormatErrorKind::SchemaMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        found: json_type_name(found).to_string(),
    })
}

/// Human-readable JSON type of a value.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Incremental builder for object descriptors.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchemaBuilder {
    fields: BTreeMap<String, SchemaDescriptor>,
    required: BTreeSet<String>,
}

impl ObjectSchemaBuilder {
    /// Add a field that must be present.
    pub fn required(mut self, name: impl Into<String>, schema: SchemaDescriptor) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.fields.insert(name, schema);
        self
    }

    /// Add a field that may be omitted.
    pub fn optional(mut self, name: impl Into<String>, schema: SchemaDescriptor) -> Self {
        self.fields.insert(name.into(), schema);
        self
    }

    /// Finish the descriptor.
    pub fn build(self) -> SchemaDescriptor {
        SchemaDescriptor::Object {
            fields: self.fields,
            required: self.required,
        }
    }
}
