//! In-memory record store
//!
//! Records are indexed by id and listed in insertion order. Every operation
//! takes the store lock once, so each one is atomic with respect to
//! concurrent requests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::schema::Fields;

use super::errors::{StoreError, StoreResult};
use super::record::Record;

/// How the store picks the id of a newly created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// One past the highest id the store has ever held. Never reuses ids.
    #[default]
    Monotonic,
    /// Current record count plus one. After deletions this can land on an
    /// existing id, in which case that record is overwritten.
    CountPlusOne,
}

#[derive(Default)]
struct Inner {
    /// id -> (insertion slot, record)
    records: HashMap<i64, (u64, Record)>,
    /// insertion slot -> id
    order: BTreeMap<u64, i64>,
    next_slot: u64,
    /// Highest id ever held
    high_water: i64,
}

impl Inner {
    /// Stores a record. An existing id keeps its place in the listing.
    fn put(&mut self, record: Record) {
        let id = record.id;
        let slot = match self.records.get(&id) {
            Some((slot, _)) => *slot,
            None => {
                let slot = self.next_slot;
                self.next_slot += 1;
                self.order.insert(slot, id);
                slot
            }
        };
        self.high_water = self.high_water.max(id);
        self.records.insert(id, (slot, record));
    }
}

/// Authoritative record collection for one resource.
pub struct RecordStore {
    inner: RwLock<Inner>,
    policy: IdPolicy,
}

impl RecordStore {
    /// Creates an empty store
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            policy,
        }
    }

    /// Creates a store holding the given records, in order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSeedId` if two records share an id.
    pub fn from_records(records: Vec<Record>, policy: IdPolicy) -> StoreResult<Self> {
        let mut inner = Inner::default();
        for record in records {
            if inner.records.contains_key(&record.id) {
                return Err(StoreError::DuplicateSeedId(record.id));
            }
            inner.put(record);
        }

        Ok(Self {
            inner: RwLock::new(inner),
            policy,
        })
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        // Mutations finish before anything that can panic, so a poisoned
        // lock still guards consistent data.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// All records in insertion order
    pub fn list(&self) -> Vec<Record> {
        let inner = self.read();
        inner
            .order
            .values()
            .filter_map(|id| inner.records.get(id))
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Inserts a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `IdsExhausted` when the next id would overflow.
    pub fn create(&self, fields: Fields) -> StoreResult<Record> {
        let mut inner = self.write();

        let last = match self.policy {
            IdPolicy::Monotonic => inner.high_water,
            IdPolicy::CountPlusOne => i64::try_from(inner.records.len()).unwrap_or(i64::MAX),
        };
        let id = last.checked_add(1).ok_or(StoreError::IdsExhausted(last))?;

        let record = Record::new(id, fields);
        inner.put(record.clone());
        Ok(record)
    }

    /// Looks up a record by id
    pub fn get(&self, id: i64) -> StoreResult<Record> {
        self.read()
            .records
            .get(&id)
            .map(|(_, record)| record.clone())
            .ok_or(StoreError::NotFound(id))
    }

    /// Replaces every field of an existing record. The id is preserved.
    pub fn update(&self, id: i64, fields: Fields) -> StoreResult<Record> {
        let mut inner = self.write();
        let (_, record) = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        *record = Record::new(id, fields);
        Ok(record.clone())
    }

    /// Removes a record
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.write();
        let (slot, _) = inner.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        inner.order.remove(&slot);
        Ok(())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}
