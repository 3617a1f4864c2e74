//! Key-value persistence seam.
//!
//! The store only ever needs synchronous get/set/remove of JSON text by key,
//! so that is the whole trait. [`RedbStore`] is the production backend;
//! [`MemoryStore`] backs tests and throwaway hosts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use log::info;
use redb::{Database, ReadableTable, TableDefinition};

use crate::error::StoreResult;

const CONTENT_TABLE: TableDefinition<&str, &str> = TableDefinition::new("content");

/// Synchronous string-keyed persistence.
///
/// `get` reports `Ok(None)` for keys that were never written. Implementations
/// are not required to be thread-safe: the store is single-user and
/// single-context, and adding synchronization here would change observable
/// behavior under multi-writer access that callers must not rely on anyway.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Embedded-database backend. One table, one transaction per operation.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let db = Database::create(path)?;
        info!("content database ready at {}", path.display());
        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(CONTENT_TABLE) {
            Ok(table) => table,
            // First read before any write lands here: the table does not
            // exist yet, which is indistinguishable from an absent key.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CONTENT_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CONTENT_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// In-memory backend. Nothing survives the process; useful for tests and for
/// hosts that only want the CRUD/aggregation logic.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
