//! Record schemas and validation
//!
//! A schema is a declarative table of field descriptors evaluated by one
//! generic validation routine, so the same validator serves every resource.
//!
//! # Design Principles
//!
//! - Every field is validated; all failures are reported together
//! - Absent optional fields take their declared default
//! - Raw values (JSON or form strings) are coerced to the field type
//! - Validation is pure and deterministic

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{FieldErrors, SchemaError, SchemaResult};
pub use loader::{cars_schema, users_schema, SchemaLoader, CAR_MANUFACTURERS};
pub use types::{Constraint, FieldDef, FieldType, FieldValue, Fields, Schema};
pub use validator::SchemaValidator;
