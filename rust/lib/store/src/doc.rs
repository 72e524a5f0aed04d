//! Document trait + DocOps CRUD operations.
//!
//! The entity impls `Document` to declare its collection, id accessors and
//! its `clean` hook. `DocOps<T>` provides get/insert/update/save/list/delete
//! on top of a KVStore backend.

use std::marker::PhantomData;
use std::sync::Arc;

use cattlecare_core::{ListParams, ListResult, ServiceError, ValidationError};
use cattlecare_kv::{KVError, KVStore};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::Ref;

/// Trait implemented by every persisted entity.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name. Documents live under `"{COLLECTION}:{id}"`.
    const COLLECTION: &'static str;

    /// Server-assigned id. None until the first save.
    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// Pre-save hook, run before every insert and update.
    ///
    /// Fills defaults for absent fields and rejects records missing required
    /// data. Must be idempotent: running it on an already-clean record
    /// changes nothing.
    fn clean(&mut self) -> Result<(), ValidationError>;
}

/// CRUD operations for one collection. Holds a reference to the KV backend.
pub struct DocOps<T: Document> {
    kv: Arc<dyn KVStore>,
    _phantom: PhantomData<T>,
}

impl<T: Document> Clone for DocOps<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.kv))
    }
}

impl<T: Document> DocOps<T> {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            _phantom: PhantomData,
        }
    }

    fn prefix() -> String {
        format!("{}:", T::COLLECTION)
    }

    fn make_key(id: &str) -> String {
        format!("{}:{}", T::COLLECTION, id)
    }

    fn kv_err(e: KVError) -> ServiceError {
        ServiceError::Storage(e.to_string())
    }

    fn decode(bytes: &[u8]) -> Result<T, ServiceError> {
        serde_json::from_slice(bytes).map_err(|e| {
            ServiceError::Internal(format!("deserialize {}: {}", T::COLLECTION, e))
        })
    }

    fn encode(record: &T) -> Result<Vec<u8>, ServiceError> {
        serde_json::to_vec(record)
            .map_err(|e| ServiceError::Internal(format!("serialize {}: {}", T::COLLECTION, e)))
    }

    /// The record's id, with an empty id treated as not yet assigned.
    fn assigned_id(record: &T) -> Option<String> {
        record.id().filter(|id| !id.is_empty()).map(str::to_string)
    }

    /// Run the `clean` hook, logging the rejection if there is one.
    fn run_clean(record: &mut T) -> Result<(), ServiceError> {
        record.clean().map_err(|e| {
            warn!(collection = T::COLLECTION, id = ?record.id(), error = %e, "validation failed");
            ServiceError::from(e)
        })
    }

    fn write(&self, record: &T, id: &str) -> Result<(), ServiceError> {
        let bytes = Self::encode(record)?;
        self.kv.set(&Self::make_key(id), &bytes).map_err(Self::kv_err)
    }

    fn exists(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.kv.get(&Self::make_key(id)).map_err(Self::kv_err)?.is_some())
    }

    /// Get a record by id. Returns None if not found.
    pub fn get(&self, id: &str) -> Result<Option<T>, ServiceError> {
        match self.kv.get(&Self::make_key(id)).map_err(Self::kv_err)? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Get a record or return NotFound error.
    pub fn get_or_err(&self, id: &str) -> Result<T, ServiceError> {
        self.get(id)?.ok_or_else(|| {
            ServiceError::NotFound(format!("{} '{}' not found", T::COLLECTION, id))
        })
    }

    /// Follow a reference into this collection.
    pub fn resolve(&self, reference: &Ref<T>) -> Result<T, ServiceError> {
        self.get_or_err(reference.id())
    }

    /// Resolve every reference in order. Fails on the first dangling one.
    pub fn resolve_all(&self, references: &[Ref<T>]) -> Result<Vec<T>, ServiceError> {
        references.iter().map(|r| self.resolve(r)).collect()
    }

    /// List all records in the collection, ordered by id.
    pub fn list(&self) -> Result<Vec<T>, ServiceError> {
        let entries = self.kv.scan(&Self::prefix()).map_err(Self::kv_err)?;
        entries
            .iter()
            .map(|(_key, bytes)| Self::decode(bytes))
            .collect()
    }

    /// List records with pagination (limit/offset).
    ///
    /// Scans all entries then slices in memory. For KV stores the full scan
    /// is unavoidable; pagination just controls how much is returned to the caller.
    pub fn list_paginated(&self, params: &ListParams) -> Result<ListResult<T>, ServiceError> {
        let all = self.list()?;
        let total = all.len();
        let offset = params.offset.min(total);
        let end = offset.saturating_add(params.limit).min(total);
        let items: Vec<T> = all.into_iter().skip(offset).take(params.limit).collect();
        Ok(ListResult {
            items,
            total,
            has_more: end < total,
        })
    }

    /// Count all records in the collection.
    pub fn count(&self) -> Result<usize, ServiceError> {
        let entries = self.kv.scan(&Self::prefix()).map_err(Self::kv_err)?;
        Ok(entries.len())
    }

    /// Create a new record. Runs `clean`, assigns an id if absent or empty,
    /// rejects duplicates.
    pub fn insert(&self, mut record: T) -> Result<T, ServiceError> {
        Self::run_clean(&mut record)?;

        let id = match Self::assigned_id(&record) {
            Some(id) => id,
            None => {
                let id = cattlecare_core::new_id();
                record.set_id(id.clone());
                id
            }
        };

        if self.exists(&id)? {
            return Err(ServiceError::Conflict(format!(
                "{} '{}' already exists",
                T::COLLECTION,
                id
            )));
        }

        self.write(&record, &id)?;
        debug!(collection = T::COLLECTION, id = %id, "inserted");
        Ok(record)
    }

    /// Update an existing record. Runs `clean`; the id must already be stored.
    pub fn update(&self, mut record: T) -> Result<T, ServiceError> {
        let id = record
            .id()
            .map(str::to_string)
            .ok_or(ValidationError::MissingRequiredField {
                entity: T::COLLECTION,
                field: "id",
            })?;
        if !self.exists(&id)? {
            return Err(ServiceError::NotFound(format!(
                "{} '{}' not found",
                T::COLLECTION,
                id
            )));
        }

        Self::run_clean(&mut record)?;
        self.write(&record, &id)?;
        debug!(collection = T::COLLECTION, id = %id, "updated");
        Ok(record)
    }

    /// Insert when the record has no id yet, otherwise write it under its id
    /// whether or not it already exists.
    pub fn save(&self, mut record: T) -> Result<T, ServiceError> {
        let Some(id) = Self::assigned_id(&record) else {
            return self.insert(record);
        };

        Self::run_clean(&mut record)?;
        self.write(&record, &id)?;
        debug!(collection = T::COLLECTION, id = %id, "saved");
        Ok(record)
    }

    /// Delete a record by id. Documents referencing it are left untouched.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.exists(id)? {
            return Err(ServiceError::NotFound(format!(
                "{} '{}' not found",
                T::COLLECTION,
                id
            )));
        }
        self.kv.delete(&Self::make_key(id)).map_err(Self::kv_err)?;
        debug!(collection = T::COLLECTION, id = %id, "deleted");
        Ok(())
    }
}
