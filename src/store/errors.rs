//! Store error types

use thiserror::Error;

use crate::schema::FieldErrors;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    // ==================
    // Request-time
    // ==================
    /// Referenced id is not in the store
    #[error("Record {0} not found")]
    NotFound(i64),

    /// The next id would not fit in an i64
    #[error("No id left to assign after {0}")]
    IdsExhausted(i64),

    // ==================
    // Seed loading (fatal at startup)
    // ==================
    /// Seed file could not be read
    #[error("Failed to read seed file '{path}': {source}")]
    SeedIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not a JSON array of records with integer ids
    #[error("Malformed seed data in '{path}': {reason}")]
    SeedFormat { path: String, reason: String },

    /// A seed record failed schema validation
    #[error("Seed record {id} is invalid: {errors}")]
    SeedRecordInvalid { id: i64, errors: FieldErrors },

    /// Two seed records share an id
    #[error("Seed data contains id {0} more than once")]
    DuplicateSeedId(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_record() {
        assert_eq!(StoreError::NotFound(3).to_string(), "Record 3 not found");
        assert_eq!(
            StoreError::DuplicateSeedId(7).to_string(),
            "Seed data contains id 7 more than once"
        );
        let err = StoreError::SeedFormat {
            path: "seed.json".into(),
            reason: "not an array".into(),
        };
        assert_eq!(err.to_string(), "Malformed seed data in 'seed.json': not an array");
    }
}
