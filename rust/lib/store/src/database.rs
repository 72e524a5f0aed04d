use std::sync::Arc;

use cattlecare_core::{Connection, ServiceError, StoreConfig};
use cattlecare_kv::{KVStore, MemoryStore, RedbStore};
use tracing::info;

use crate::{DocOps, Document, Ref};

/// Handle to an opened document store. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    kv: Arc<dyn KVStore>,
}

impl Database {
    /// Wrap an already-open backend.
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Open the backend named by a connection string.
    pub fn connect(connection: &str) -> Result<Self, ServiceError> {
        let kv: Arc<dyn KVStore> = match Connection::parse(connection)? {
            Connection::Redb(path) => {
                info!("Opening redb store at {}", path.display());
                Arc::new(
                    RedbStore::open(&path)
                        .map_err(|e| ServiceError::Storage(format!("open {}: {}", path.display(), e)))?,
                )
            }
            Connection::Memory => {
                info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::new(kv))
    }

    pub fn open(config: &StoreConfig) -> Result<Self, ServiceError> {
        Self::connect(&config.connection)
    }

    /// Fresh in-memory database.
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn collection<T: Document>(&self) -> DocOps<T> {
        DocOps::new(Arc::clone(&self.kv))
    }

    /// Dereference: fetch the document a reference points to.
    pub fn resolve<T: Document>(&self, reference: &Ref<T>) -> Result<T, ServiceError> {
        self.collection::<T>().resolve(reference)
    }

    pub fn kv(&self) -> &Arc<dyn KVStore> {
        &self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_memory_and_redb() {
        assert!(Database::connect("memory://").is_ok());

        let dir = tempfile::tempdir().unwrap();
        let conn = format!("redb://{}", dir.path().join("herd.redb").display());
        let db = Database::connect(&conn).unwrap();
        db.kv().set("users:1", b"{}").unwrap();
        assert!(dir.path().join("herd.redb").exists());
    }

    #[test]
    fn connect_rejects_unknown_scheme() {
        let err = Database::connect("mongodb://localhost:27017/herd").err().unwrap();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
