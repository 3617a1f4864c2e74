//! Operation errors for the content store.
//!
//! Every failure a store operation can surface is a [`StoreError`]. Corrupt
//! persisted values are deliberately absent from this taxonomy: reads degrade
//! to an empty collection or default record instead of failing the caller.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required input field was empty or missing.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An update referenced a record id that does not exist.
    #[error("no record found with id {0}")]
    NotFound(u64),

    /// The storage backend failed outright.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A value could not be serialized for storage. Deserialization failures
    /// on read never reach here; they degrade to empty.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A media file could not be read from disk.
    #[error("could not read media file {path}: {source}")]
    MediaRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        StoreError::Backend(format!("failed to open database: {err}"))
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::Backend(format!("transaction error: {err}"))
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::Backend(format!("table operation error: {err}"))
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::Backend(format!("storage error: {err}"))
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::Backend(format!("commit error: {err}"))
    }
}
