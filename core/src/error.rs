// core/src/error.rs

//! Error taxonomy for the synchronization core.
//!
//! Three layers, mapped strictly one level up and never retried:
//! component errors (`UploadError`, `StoreError`) are produced by the two
//! remote clients, and each pipeline operation reports exactly one terminal
//! `CatalogError` variant to its caller.

use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failure of a single image upload attempt. One variant per failure point
/// in the upload protocol; the caller decides whether to try again.
#[derive(Debug, Error)]
pub enum UploadError {
  #[error("Image content was empty or unreadable")]
  ReadFailed,

  #[error("Image host request failed. Source: {source}")]
  RequestFailed {
    #[source]
    source: AnyhowError,
  },

  #[error("Image host response carried no secure_url")]
  UrlMissing,
}

/// Failure of a single document-store round trip.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Write of document '{id}' failed. Source: {source}")]
  WriteFailed {
    id: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Read from the catalog collection failed. Source: {source}")]
  ReadFailed {
    #[source]
    source: AnyhowError,
  },

  #[error("Delete of document '{id}' failed. Source: {source}")]
  DeleteFailed {
    id: String,
    #[source]
    source: AnyhowError,
  },

  #[error("No document stored under '{id}'")]
  NotFound { id: String },
}

/// Terminal outcome of a failed pipeline operation, as reported to the UI
/// collaborator. The wrapped source is the component error that sank the
/// operation.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Listing was not created. Source: {source}")]
  CreateFailed {
    #[source]
    source: AnyhowError,
  },

  #[error("Listing '{id}' was not updated. Source: {source}")]
  UpdateFailed {
    id: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Listing '{id}' was not deleted. Source: {source}")]
  DeleteFailed {
    id: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Catalog could not be read. Source: {source}")]
  ListFailed {
    #[source]
    source: AnyhowError,
  },
}

/// Environment loading failure, surfaced before any client is built.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Missing environment variable '{var}'")]
  MissingVar { var: String },
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
