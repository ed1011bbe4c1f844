//! Registry error types

use thiserror::Error;

use crate::store::StoreError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The key failed CPF validation
    #[error("Invalid CPF: {0}")]
    InvalidKey(String),

    /// No customer has this CPF
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// A customer with this CPF already exists
    #[error("Customer already registered: {0}")]
    Conflict(String),

    /// A field holds a character the file format cannot store
    #[error("Invalid value for '{field}': contains {found:?}")]
    InvalidField { field: &'static str, found: char },

    /// The backing store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl RegistryError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::InvalidKey(_) => 400,
            RegistryError::InvalidField { .. } => 400,
            RegistryError::NotFound(_) => 404,
            RegistryError::Conflict(_) => 409,
            RegistryError::Storage(_) => 500,
        }
    }

    /// True for failures caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
