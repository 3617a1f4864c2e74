use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Response envelope returned by every FFI function, serialized to JSON.
#[derive(Debug, Serialize, Deserialize)]
pub enum AppResponse {
    DatabaseError(String),
    SerializationError(String),
    NotFound(String),
    ValidationError(String),
    BadRequest(String),
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppResponse::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl From<StoreError> for AppResponse {
    fn from(err: StoreError) -> Self {
        let msg = err.to_string();
        match err {
            StoreError::MissingField(_) => AppResponse::ValidationError(msg),
            StoreError::NotFound(_) => AppResponse::NotFound(msg),
            StoreError::Serialization(_) => AppResponse::SerializationError(msg),
            StoreError::Backend(_) | StoreError::MediaRead { .. } => {
                AppResponse::DatabaseError(msg)
            }
        }
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }
}
