//! Schema type definitions
//!
//! A schema is an ordered table of field descriptors. Each descriptor names
//! the field, its type, whether it is required, the default used when an
//! optional field is absent, and the constraints checked (in order) when the
//! field is present.
//!
//! Supported types:
//! - string: UTF-8 string
//! - integer: 64-bit signed integer

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }
}

/// Validated domain fields of a record, keyed by field name.
pub type Fields = BTreeMap<String, FieldValue>;

/// A typed field value held by a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    String(String),
}

impl FieldValue {
    /// Returns the type of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::String(_) => FieldType::String,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

/// A single constraint on a present field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Constraint {
    /// String must have at least this many characters
    MinLength(usize),
    /// String must have no more than this many characters
    MaxLength(usize),
    /// Integer must be >= this value
    Minimum(i64),
    /// Integer must be <= this value
    Maximum(i64),
    /// Value must be one of the listed values
    OneOf(Vec<FieldValue>),
}

impl Constraint {
    /// Checks a coerced value, returning the failure message if it does not hold.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        match (self, value) {
            (Constraint::MinLength(min), FieldValue::String(s)) => {
                (s.chars().count() < *min).then(|| format!("Must have at least {} characters.", min))
            }
            (Constraint::MaxLength(max), FieldValue::String(s)) => (s.chars().count() > *max)
                .then(|| format!("Must have no more than {} characters.", max)),
            (Constraint::Minimum(min), FieldValue::Integer(n)) => {
                (n < min).then(|| format!("Must be greater than or equal to {}.", min))
            }
            (Constraint::Maximum(max), FieldValue::Integer(n)) => {
                (n > max).then(|| format!("Must be less than or equal to {}.", max))
            }
            (Constraint::OneOf(allowed), v) => {
                if allowed.contains(v) {
                    None
                } else {
                    let listed: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
                    Some(format!("Must be one of {}.", listed.join(", ")))
                }
            }
            // Structure validation rejects mismatched constraints up front.
            _ => None,
        }
    }

    /// Whether this constraint can be applied to the given field type.
    pub fn applies_to(&self, field_type: FieldType) -> bool {
        match self {
            Constraint::MinLength(_) | Constraint::MaxLength(_) => field_type == FieldType::String,
            Constraint::Minimum(_) | Constraint::Maximum(_) => field_type == FieldType::Integer,
            Constraint::OneOf(values) => values.iter().all(|v| v.field_type() == field_type),
        }
    }
}

/// Field descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears in request bodies and records
    pub name: String,
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether field must be present
    #[serde(default)]
    pub required: bool,
    /// Value substituted when an optional field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    /// Constraints checked in order when the field is present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl FieldDef {
    /// Create a required string field
    pub fn required_string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::String,
            required: true,
            default: None,
            constraints: Vec::new(),
        }
    }

    /// Create an optional string field with a default
    pub fn optional_string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::String,
            required: false,
            default: Some(FieldValue::String(default.into())),
            constraints: Vec::new(),
        }
    }

    /// Create a required integer field
    pub fn required_int(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Integer,
            required: true,
            default: None,
            constraints: Vec::new(),
        }
    }

    /// Create an optional integer field with a default
    pub fn optional_int(name: impl Into<String>, default: i64) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Integer,
            required: false,
            default: Some(FieldValue::Integer(default)),
            constraints: Vec::new(),
        }
    }

    /// Append a constraint
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn min_length(self, n: usize) -> Self {
        self.with(Constraint::MinLength(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.with(Constraint::MaxLength(n))
    }

    pub fn minimum(self, n: i64) -> Self {
        self.with(Constraint::Minimum(n))
    }

    pub fn maximum(self, n: i64) -> Self {
        self.with(Constraint::Maximum(n))
    }

    pub fn one_of<V: Into<FieldValue>>(self, values: impl IntoIterator<Item = V>) -> Self {
        self.with(Constraint::OneOf(values.into_iter().map(Into::into).collect()))
    }
}

/// Complete schema for one resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Resource name (e.g. "users")
    pub name: String,
    /// Message returned when an id is not in the store
    pub not_found_message: String,
    /// Field descriptors, in declaration order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a new schema
    pub fn new(
        name: impl Into<String>,
        not_found_message: impl Into<String>,
        fields: Vec<FieldDef>,
    ) -> Self {
        Self {
            name: name.into(),
            not_found_message: not_found_message.into(),
            fields,
        }
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema structure itself (not a record)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("Schema must declare at least one field".into());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name == "id" {
                return Err("'id' is assigned by the store and cannot be declared".into());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("Field '{}' is declared twice", field.name));
            }

            match (&field.default, field.required) {
                (None, false) => {
                    return Err(format!("Optional field '{}' must declare a default", field.name));
                }
                (Some(default), _) if default.field_type() != field.field_type => {
                    return Err(format!(
                        "Default for '{}' must be of type {}",
                        field.name,
                        field.field_type.type_name()
                    ));
                }
                _ => {}
            }

            if let Some(bad) = field.constraints.iter().find(|c| !c.applies_to(field.field_type)) {
                return Err(format!(
                    "Constraint {:?} does not apply to {} field '{}'",
                    bad,
                    field.field_type.type_name(),
                    field.name
                ));
            }
        }

        Ok(())
    }
}
