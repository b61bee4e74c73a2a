//! Schema validator for incoming record bodies
//!
//! Validation semantics:
//! - Every declared field is checked; the result reports every failing field
//! - Required and absent: `The "<field>" field is required.`
//! - Optional and absent: the declared default is used, nothing else checked
//! - Present: the raw value is coerced to the field type, then constraints
//!   run in declaration order and the first failure is reported
//! - Undeclared keys (including `id`) are ignored
//!
//! Validator does not mutate its input and has no side effects.

use serde_json::{Map, Number, Value};

use super::errors::FieldErrors;
use super::types::{FieldDef, FieldType, FieldValue, Fields, Schema};

const NULL_MESSAGE: &str = "May not be null.";
const STRING_MESSAGE: &str = "Must be a string.";
const NUMBER_MESSAGE: &str = "Must be a number.";
const INTEGER_MESSAGE: &str = "Must be an integer.";

/// Schema validator that turns raw bodies into typed fields.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a validator for the given schema.
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validates a raw body.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` holding one message per failing field.
    pub fn validate(&self, input: &Map<String, Value>) -> Result<Fields, FieldErrors> {
        let mut fields = Fields::new();
        let mut errors = FieldErrors::new();

        for def in &self.schema.fields {
            match self.validate_field(def, input.get(&def.name)) {
                Ok(value) => {
                    fields.insert(def.name.clone(), value);
                }
                Err(message) => errors.insert(def.name.clone(), message),
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }

    /// Validates a single field.
    fn validate_field(&self, def: &FieldDef, raw: Option<&Value>) -> Result<FieldValue, String> {
        let raw = match raw {
            Some(raw) => raw,
            None if def.required => return Err(required_message(&def.name)),
            None => {
                // validate_structure guarantees optional fields carry a default
                return def
                    .default
                    .clone()
                    .ok_or_else(|| required_message(&def.name));
            }
        };

        let value = coerce(def.field_type, raw)?;

        match def.constraints.iter().find_map(|c| c.check(&value)) {
            Some(message) => Err(message),
            None => Ok(value),
        }
    }
}

fn required_message(field: &str) -> String {
    format!("The \"{}\" field is required.", field)
}

/// Coerces a raw JSON value into the field type.
fn coerce(field_type: FieldType, raw: &Value) -> Result<FieldValue, String> {
    if raw.is_null() {
        return Err(NULL_MESSAGE.into());
    }

    match field_type {
        FieldType::String => match raw {
            Value::String(s) => Ok(FieldValue::String(s.clone())),
            Value::Number(n) => Ok(FieldValue::String(n.to_string())),
            _ => Err(STRING_MESSAGE.into()),
        },
        FieldType::Integer => match raw {
            Value::Number(n) => integer_from_number(n),
            Value::String(s) => integer_from_str(s),
            _ => Err(NUMBER_MESSAGE.into()),
        },
    }
}

fn integer_from_number(n: &Number) -> Result<FieldValue, String> {
    if let Some(i) = n.as_i64() {
        return Ok(FieldValue::Integer(i));
    }
    match n.as_f64() {
        Some(f) => integer_from_f64(f),
        None => Err(INTEGER_MESSAGE.into()),
    }
}

fn integer_from_str(s: &str) -> Result<FieldValue, String> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(FieldValue::Integer(i));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => integer_from_f64(f),
        _ => Err(NUMBER_MESSAGE.into()),
    }
}

fn integer_from_f64(f: f64) -> Result<FieldValue, String> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(FieldValue::Integer(f as i64))
    } else {
        Err(INTEGER_MESSAGE.into())
    }
}
