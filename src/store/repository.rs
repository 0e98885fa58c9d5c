//! Typed repositories over a shared storage backend.

use super::{Backend, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// A record type that lives in a named collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Collection (file) name the type is stored under.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// CRUD access to one collection, storage injected.
pub struct Repository<T> {
    backend: Arc<dyn Backend>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    /// All records in the collection, in insertion order.
    pub fn list(&self) -> Result<Vec<T>, StoreError> {
        let Some(contents) = self.backend.read(T::COLLECTION)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            collection: T::COLLECTION.to_string(),
            source,
        })
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.list()?.into_iter().find(|r| r.id() == id))
    }

    /// Insert a new record; the id must not already exist.
    pub fn insert(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.list()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::Duplicate {
                collection: T::COLLECTION.to_string(),
                id: record.id().to_string(),
            });
        }
        records.push(record.clone());
        self.persist(&records)?;
        Ok(record)
    }

    /// Replace an existing record in place, keyed by id.
    pub fn update(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.list()?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) else {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION.to_string(),
                id: record.id().to_string(),
            });
        };
        *slot = record.clone();
        self.persist(&records)?;
        Ok(record)
    }

    /// Remove by id; `false` if no such record existed.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.persist(&records)?;
        Ok(true)
    }

    /// Records matching a predicate.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Result<Vec<T>, StoreError> {
        Ok(self.list()?.into_iter().filter(|r| pred(r)).collect())
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list()?.len())
    }

    fn persist(&self, records: &[T]) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string_pretty(records).map_err(|source| StoreError::Corrupt {
                collection: T::COLLECTION.to_string(),
                source,
            })?;
        self.backend.write(T::COLLECTION, &contents)
    }
}
