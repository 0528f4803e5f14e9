// src/lib.rs

//! Sokoni: the listing synchronization core of a small marketplace catalog.
//!
//! Sellers create, update, list and delete product listings, each with one
//! hosted image. This crate owns the part with real failure modes:
//!  - One multipart upload to the image host per new photo.
//!  - Keyed document writes, reads and deletes against the remote catalog
//!    store (collection `Products`, one document per listing).
//!  - A [`CatalogPipeline`] sequencing the two remote calls of each
//!    operation so the pair appears atomic to the caller, with no retries
//!    and no partial listings.
//!  - A [`CatalogCache`] projection of the remote collection for display,
//!    mutated only by the pipeline and read passively by the UI.
//!
//! Screen layout, form handling, navigation and authentication are the UI
//! collaborator's business; it calls in with validated field values and
//! raw image bytes, and renders whatever the pipeline reports.

pub mod cache;
pub mod config;
pub mod error;
pub mod listing;
pub mod pipeline;
pub mod store;
pub mod upload;

// --- Re-exports for the Public API ---

pub use crate::cache::CatalogCache;
pub use crate::config::CatalogConfig;
pub use crate::error::{CatalogError, CatalogResult, ConfigError, StoreError, UploadError};
pub use crate::listing::{Listing, ListingFields};
pub use crate::pipeline::CatalogPipeline;
pub use crate::store::{CatalogStore, HttpCatalogStore, COLLECTION};
pub use crate::upload::{HttpImageHost, ImageHost, NewImage};
