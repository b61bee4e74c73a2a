//! Seed data loading
//!
//! The seed file is a JSON array of record objects, each carrying an integer
//! `id` plus the schema's fields. Every seed record goes through the same
//! validator as request bodies, so the store never holds a record its schema
//! would reject. Any problem aborts startup.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::schema::{Schema, SchemaValidator};

use super::errors::{StoreError, StoreResult};
use super::record::Record;

/// Reads and validates a seed file.
pub fn load_seed(path: &Path, schema: &Schema) -> StoreResult<Vec<Record>> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| StoreError::SeedIo {
        path: display.clone(),
        source,
    })?;
    parse_seed(&content, &display, schema)
}

/// Parses and validates seed JSON. `origin` names the source in error messages.
pub fn parse_seed(content: &str, origin: &str, schema: &Schema) -> StoreResult<Vec<Record>> {
    let format_error = |reason: String| StoreError::SeedFormat {
        path: origin.to_string(),
        reason,
    };

    let data: Value = serde_json::from_str(content).map_err(|e| format_error(e.to_string()))?;
    let items = data
        .as_array()
        .ok_or_else(|| format_error("expected a JSON array of records".into()))?;

    let validator = SchemaValidator::new(schema);
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let obj = item
            .as_object()
            .ok_or_else(|| format_error(format!("element {} is not an object", index)))?;

        let id = obj
            .get("id")
            .and_then(Value::as_i64)
            .filter(|id| *id > 0)
            .ok_or_else(|| format_error(format!("element {} has no positive integer id", index)))?;

        let fields = validator
            .validate(obj)
            .map_err(|errors| StoreError::SeedRecordInvalid { id, errors })?;

        records.push(Record::new(id, fields));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{cars_schema, users_schema, FieldValue};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CARS: &str = r#"[
        {"id": 1, "manufacturer": "Chevrolet", "model": "Equinox", "year": 2008, "vin": "1J4PN2GK8BW312399"},
        {"id": 2, "manufacturer": "Infiniti", "model": "QX", "year": 1997, "vin": "2C3CDXEJ2FH079479"}
    ]"#;

    #[test]
    fn test_parse_seed_in_order() {
        let records = parse_seed(CARS, "cars.json", &cars_schema()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].get("model"), Some(&FieldValue::from("QX")));
    }

    #[test]
    fn test_load_seed_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CARS.as_bytes()).unwrap();

        let records = load_seed(file.path(), &cars_schema()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_seed_file() {
        let err = load_seed(Path::new("/nonexistent/seed.json"), &cars_schema()).unwrap_err();
        assert!(matches!(err, StoreError::SeedIo { .. }));
    }

    #[test]
    fn test_seed_must_be_array() {
        let err = parse_seed(r#"{"id": 1}"#, "x", &cars_schema()).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn test_seed_invalid_json() {
        let err = parse_seed("[{", "x", &cars_schema()).unwrap_err();
        assert!(matches!(err, StoreError::SeedFormat { .. }));
    }

    #[test]
    fn test_seed_requires_id() {
        let err = parse_seed(
            r#"[{"manufacturer": "Honda", "model": "Fit", "year": 2010}]"#,
            "x",
            &cars_schema(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("element 0"));

        let err = parse_seed(
            r#"[{"id": 0, "manufacturer": "Honda", "model": "Fit", "year": 2010}]"#,
            "x",
            &cars_schema(),
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::SeedFormat { .. }));
    }

    #[test]
    fn test_seed_record_validated() {
        let err = parse_seed(
            r#"[{"id": 5, "bitcoin_address": "abc", "social_security_number": "short"}]"#,
            "users.json",
            &users_schema(),
        )
        .unwrap_err();

        match err {
            StoreError::SeedRecordInvalid { id, errors } => {
                assert_eq!(id, 5);
                assert_eq!(
                    errors.get("social_security_number"),
                    Some("Must have at least 11 characters.")
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
