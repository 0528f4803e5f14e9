// core/src/pipeline.rs

//! The Listing Pipeline: orchestrates create, update, delete and list
//! against the image host and the document store, and owns the display
//! cache.
//!
//! Each operation is one async fn issuing at most two network calls in
//! sequence: the image upload, when there is one, strictly precedes the
//! store write, and the two are never in flight together for the same
//! operation. Independent operations may run concurrently with no
//! coordination; the last completed cache mutation wins. There are no
//! retries, no cancellation and no pipeline-imposed deadline: timeouts are
//! the transport's business, and an operation runs to its single terminal
//! outcome.

use crate::cache::CatalogCache;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::listing::{Listing, ListingFields};
use crate::store::{CatalogStore, HttpCatalogStore};
use crate::upload::{HttpImageHost, ImageHost, NewImage};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Orchestration core of the catalog. The UI collaborator calls the four
/// operations with validated field values and renders what they report;
/// the catalog itself is read through the cache handle.
pub struct CatalogPipeline {
  images: Arc<dyn ImageHost>,
  store: Arc<dyn CatalogStore>,
  cache: CatalogCache,
}

impl CatalogPipeline {
  pub fn new(images: Arc<dyn ImageHost>, store: Arc<dyn CatalogStore>) -> Self {
    Self {
      images,
      store,
      cache: CatalogCache::new(),
    }
  }

  /// Wires the production HTTP clients from a loaded configuration.
  pub fn from_config(config: &CatalogConfig) -> Self {
    Self::new(
      Arc::new(HttpImageHost::new(&config.upload_url, &config.upload_preset)),
      Arc::new(HttpCatalogStore::new(&config.store_url)),
    )
  }

  /// Handle to the display cache. The pipeline is the only writer; UI-side
  /// holders should treat the handle as read-only.
  pub fn cache(&self) -> CatalogCache {
    self.cache.clone()
  }

  /// Persists a brand-new listing and returns its store-assigned id.
  ///
  /// The image, when present, is uploaded before anything is written: a
  /// failed upload aborts the whole create, so the user never finds a
  /// photo-less listing in the catalog when they expected a photo. The
  /// resulting `imageUrl` comes strictly from the upload outcome: the
  /// hosted URL, or null when no image was supplied.
  ///
  /// The cache is left alone on success; callers refresh via [`list`] so
  /// the remote collection stays the single source of truth.
  ///
  /// [`list`]: CatalogPipeline::list
  #[instrument(skip(self, fields, image), fields(has_image = image.is_some()), err(Display))]
  pub async fn create(
    &self,
    mut fields: ListingFields,
    image: Option<NewImage>,
  ) -> CatalogResult<String> {
    fields.image_url = match image {
      Some(img) => {
        let url = self
          .images
          .upload(&img.bytes, &img.filename)
          .await
          .map_err(|upload_err| CatalogError::CreateFailed {
            source: upload_err.into(),
          })?;
        Some(url)
      }
      None => None,
    };

    let id = self
      .store
      .create_key()
      .await
      .map_err(|store_err| CatalogError::CreateFailed {
        source: store_err.into(),
      })?;

    // A minted key whose write fails is abandoned; store-side keys are
    // cheap and unused ones are not cleaned up.
    self
      .store
      .write(&id, &fields)
      .await
      .map_err(|store_err| CatalogError::CreateFailed {
        source: store_err.into(),
      })?;

    info!(%id, "Listing created.");
    Ok(id)
  }

  /// Rewrites the full document at `id`; the last writer wins.
  ///
  /// Fields go to the store exactly as supplied. Callers merge unchanged
  /// values themselves, typically by [`fetch`]-ing the current record
  /// first, and that includes carrying the previous `imageUrl`. A new
  /// image, when present, is uploaded first and its URL replaces
  /// `fields.image_url`; when that upload fails the operation aborts and
  /// the stored record, previous image URL included, stays as it was.
  ///
  /// A successful write triggers a cache refresh. The refresh is
  /// best-effort: the write itself is verified, so a failed refresh keeps
  /// the last-known-good cache and is only logged.
  ///
  /// [`fetch`]: CatalogPipeline::fetch
  #[instrument(skip(self, fields, image), fields(has_image = image.is_some()), err(Display))]
  pub async fn update(
    &self,
    id: &str,
    mut fields: ListingFields,
    image: Option<NewImage>,
  ) -> CatalogResult<()> {
    if let Some(img) = image {
      let url = self
        .images
        .upload(&img.bytes, &img.filename)
        .await
        .map_err(|upload_err| CatalogError::UpdateFailed {
          id: id.to_string(),
          source: upload_err.into(),
        })?;
      fields.image_url = Some(url);
    }

    self
      .store
      .write(id, &fields)
      .await
      .map_err(|store_err| CatalogError::UpdateFailed {
        id: id.to_string(),
        source: store_err.into(),
      })?;
    info!(%id, "Listing updated.");

    if let Err(refresh_err) = self.list().await {
      warn!(%id, error = %refresh_err, "Catalog refresh after update failed; cache kept as-is.");
    }
    Ok(())
  }

  /// Deletes the remote document, then evicts the local entry.
  ///
  /// Eviction is driven by the store's stated delete result, not by a
  /// re-read, so no refresh round-trip is needed. Deleting an id that is
  /// already gone succeeds; the store's delete is idempotent. On failure
  /// the cache is untouched.
  #[instrument(skip(self), err(Display))]
  pub async fn delete(&self, id: &str) -> CatalogResult<()> {
    self
      .store
      .delete(id)
      .await
      .map_err(|store_err| CatalogError::DeleteFailed {
        id: id.to_string(),
        source: store_err.into(),
      })?;

    let evicted = self.cache.evict(id);
    debug!(%id, evicted, "Listing deleted.");
    Ok(())
  }

  /// Replaces the cache with the store's current contents and returns the
  /// fresh snapshot.
  ///
  /// Every fetched document is tagged with its collection key; the key is
  /// authoritative and whatever id the document itself claims is
  /// discarded. On failure the previous cache contents stay put (a stale
  /// catalog beats a blank screen) and the error still reaches the caller
  /// so the view can be flagged as possibly outdated.
  #[instrument(skip(self), err(Display))]
  pub async fn list(&self) -> CatalogResult<Vec<Listing>> {
    let documents = self
      .store
      .read_all()
      .await
      .map_err(|store_err| CatalogError::ListFailed {
        source: store_err.into(),
      })?;

    let listings: Vec<Listing> = documents
      .into_iter()
      .map(|(id, fields)| Listing::new(id, fields))
      .collect();
    self.cache.replace_all(listings);
    debug!(count = self.cache.len(), "Catalog cache replaced.");
    Ok(self.cache.snapshot())
  }

  /// Reads a single listing, tagged with its key.
  ///
  /// Edit flows use this to pre-fill a form and merge unchanged fields
  /// before calling [`update`]. The cache is not consulted and not
  /// touched.
  ///
  /// [`update`]: CatalogPipeline::update
  #[instrument(skip(self), err(Display))]
  pub async fn fetch(&self, id: &str) -> CatalogResult<Listing> {
    let fields = self
      .store
      .read_one(id)
      .await
      .map_err(|store_err| CatalogError::ListFailed {
        source: store_err.into(),
      })?;
    Ok(Listing::new(id, fields))
  }
}
