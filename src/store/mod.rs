//! Record store
//!
//! Owns the in-memory record collection for one resource type: id
//! assignment, lookup, replacement and removal. Records reach the store only
//! after schema validation, both at startup (seed data) and per request.

mod errors;
mod memory;
mod record;
mod seed;

pub use errors::{StoreError, StoreResult};
pub use memory::{IdPolicy, RecordStore};
pub use record::Record;
pub use seed::{load_seed, parse_seed};
