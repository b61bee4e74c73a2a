//! Schema loader
//!
//! Holds the registry of known resource schemas. The built-in `users` and
//! `cars` schemas are always present; additional schemas can be read from
//! JSON files at startup. A malformed schema file is a startup failure.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldDef, Schema};

/// Manufacturers accepted by the built-in `cars` schema.
pub const CAR_MANUFACTURERS: &[&str] = &[
    "Acura", "Aston Martin", "Audi", "BMW", "Bentley", "Buick", "Cadillac", "Chevrolet",
    "Chrysler", "Dodge", "Ferrari", "Fiat", "Ford", "GMC", "Honda", "Hummer", "Hyundai",
    "Infiniti", "Isuzu", "Jaguar", "Jeep", "Kia", "Lamborghini", "Land Rover", "Lexus",
    "Lincoln", "Lotus", "Maserati", "Mazda", "Mercedes-Benz", "Mercury", "Mini", "Mitsubishi",
    "Nissan", "Oldsmobile", "Plymouth", "Pontiac", "Porsche", "Ram", "Rolls-Royce", "Saab",
    "Saturn", "Scion", "Subaru", "Suzuki", "Tesla", "Toyota", "Volkswagen", "Volvo",
];

/// Built-in schema for bitcoin users.
pub fn users_schema() -> Schema {
    Schema::new(
        "users",
        "User ID not found.",
        vec![
            FieldDef::optional_string("first_name", ""),
            FieldDef::optional_string("last_name", ""),
            FieldDef::required_string("bitcoin_address").max_length(34),
            FieldDef::required_string("social_security_number")
                .min_length(11)
                .max_length(11),
        ],
    )
}

/// Built-in schema for cars.
pub fn cars_schema() -> Schema {
    Schema::new(
        "cars",
        "Car ID not found.",
        vec![
            FieldDef::required_string("manufacturer").one_of(CAR_MANUFACTURERS.iter().copied()),
            FieldDef::required_string("model").max_length(50),
            FieldDef::required_int("year").minimum(1900).maximum(2050),
            FieldDef::optional_string("vin", "").max_length(17),
        ],
    )
}

/// Registry of resource schemas, keyed by resource name.
pub struct SchemaLoader {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    /// Creates a loader holding the built-in schemas.
    pub fn with_builtins() -> Self {
        let mut loader = Self::new();
        for schema in [users_schema(), cars_schema()] {
            loader.schemas.insert(schema.name.clone(), schema);
        }
        loader
    }

    /// Registers a schema, replacing any schema of the same name.
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::InvalidStructure {
                name: schema.name.clone(),
                reason,
            })?;
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Reads a schema from a JSON file and registers it. Returns its name.
    pub fn load_file(&mut self, path: &Path) -> SchemaResult<String> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: display.clone(),
            source,
        })?;

        let schema: Schema = serde_json::from_str(&content).map_err(|e| SchemaError::Malformed {
            path: display,
            reason: e.to_string(),
        })?;

        let name = schema.name.clone();
        self.register(schema)?;
        Ok(name)
    }

    /// Gets a schema by resource name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Gets a schema by resource name, failing with the list of known names.
    pub fn resolve(&self, name: &str) -> SchemaResult<Schema> {
        self.get(name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownResource(name.to_string(), self.names().join(", ")))
    }

    /// Names of all registered schemas, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtins_are_well_formed() {
        assert!(users_schema().validate_structure().is_ok());
        assert!(cars_schema().validate_structure().is_ok());

        let loader = SchemaLoader::with_builtins();
        assert_eq!(loader.names(), vec!["cars", "users"]);
    }

    #[test]
    fn test_resolve_unknown_lists_names() {
        let loader = SchemaLoader::with_builtins();
        let err = loader.resolve("boats").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("boats"));
        assert!(msg.contains("cars, users"));
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = r#"{
            "name": "books",
            "not_found_message": "Book ID not found.",
            "fields": [
                {"name": "title", "type": "string", "required": true,
                 "constraints": [{"kind": "max_length", "value": 80}]},
                {"name": "pages", "type": "integer", "default": 0,
                 "constraints": [{"kind": "minimum", "value": 0}]}
            ]
        }"#;
        file.write_all(json.as_bytes()).unwrap();

        let mut loader = SchemaLoader::new();
        let name = loader.load_file(file.path()).unwrap();
        assert_eq!(name, "books");

        let schema = loader.get("books").unwrap();
        assert_eq!(schema.fields.len(), 2);
        assert!(!schema.field("pages").unwrap().required);
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let mut loader = SchemaLoader::new();
        let err = loader.load_file(file.path()).unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn test_load_structurally_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"name": "x", "not_found_message": "x", "fields": []}"#)
            .unwrap();

        let mut loader = SchemaLoader::new();
        let err = loader.load_file(file.path()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidStructure { .. }));
        assert_eq!(loader.schema_count(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let mut loader = SchemaLoader::new();
        let err = loader.load_file(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
