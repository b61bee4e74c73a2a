//! Stored record type

use serde::{Deserialize, Serialize};

use crate::schema::{FieldValue, Fields};

/// A record held by the store: the store-assigned id plus validated fields.
///
/// Serializes as a flat JSON object, e.g.
/// `{"id": 1, "manufacturer": "Chevrolet", "model": "Equinox", "year": 2008, "vin": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    pub fn new(id: i64, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Value of a single field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }
}
