//! Storage error handling

use thiserror::Error;

use crate::error::BoxError;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
  /// Reading stored planets failed
  #[error("Failed to fetch planets")]
  FetchFailed(#[source] BoxError),

  /// Writing planets failed; the transaction was rolled back
  #[error("Failed to save planets")]
  SaveFailed(#[source] BoxError),
}

impl StorageError {
  pub fn fetch(error: impl Into<BoxError>) -> Self {
    StorageError::FetchFailed(error.into())
  }

  pub fn save(error: impl Into<BoxError>) -> Self {
    StorageError::SaveFailed(error.into())
  }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
