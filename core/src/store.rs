// core/src/store.rs

//! The Catalog Store Client: single blocking round-trips against the
//! remote keyed document collection.
//!
//! No caching lives in this component; the pipeline keeps the cache one
//! level up so it can be invalidated independently of store calls.

use crate::error::StoreError;
use crate::listing::{Listing, ListingFields};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use uuid::Uuid;

/// The one logical collection every operation addresses.
pub const COLLECTION: &str = "Products";

/// Seam for the remote document store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
  /// Mints a fresh unique key without writing anything under it. Key
  /// minting and the value write are separate steps; a minted key that is
  /// never written to is simply abandoned.
  async fn create_key(&self) -> Result<String, StoreError>;

  /// Upserts the full document at `id`, overwriting whatever was stored.
  /// Writing identical fields twice leaves the same stored state.
  async fn write(&self, id: &str, fields: &ListingFields) -> Result<(), StoreError>;

  /// Fetches every document in the collection, keyed by id. The store
  /// promises nothing about ordering; callers must treat the returned
  /// order as the fetch order, never the store's.
  async fn read_all(&self) -> Result<Vec<(String, ListingFields)>, StoreError>;

  /// Fetches a single document, `NotFound` when absent.
  async fn read_one(&self, id: &str) -> Result<ListingFields, StoreError>;

  /// Removes the document at `id`. Deleting an absent id is a success;
  /// delete is idempotent on the store side.
  async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Production store client speaking the Firebase-style REST dialect:
/// documents live at `{base}/Products/{id}.json`, the whole collection at
/// `{base}/Products.json`, and a `null` body stands for "nothing here".
pub struct HttpCatalogStore {
  client: reqwest::Client,
  base_url: String,
}

impl HttpCatalogStore {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url = base_url.into();
    Self {
      client: reqwest::Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  fn collection_url(&self) -> String {
    format!("{}/{}.json", self.base_url, COLLECTION)
  }

  fn document_url(&self, id: &str) -> String {
    format!("{}/{}/{}.json", self.base_url, COLLECTION, id)
  }
}

/// Keys are minted locally, the way push keys are: globally unique without
/// a round trip, written to later or abandoned.
fn mint_key() -> String {
  Uuid::new_v4().to_string()
}

#[async_trait]
impl CatalogStore for HttpCatalogStore {
  async fn create_key(&self) -> Result<String, StoreError> {
    let key = mint_key();
    debug!(%key, "Minted store key.");
    Ok(key)
  }

  #[instrument(name = "catalog_store::write", skip(self, fields), err(Display))]
  async fn write(&self, id: &str, fields: &ListingFields) -> Result<(), StoreError> {
    // The document embeds its own id alongside the fields.
    let document = Listing::new(id, fields.clone());
    let response = self
      .client
      .put(self.document_url(id))
      .json(&document)
      .send()
      .await
      .map_err(|transport_err| StoreError::WriteFailed {
        id: id.to_string(),
        source: anyhow!(transport_err),
      })?;

    let status = response.status();
    if !status.is_success() {
      return Err(StoreError::WriteFailed {
        id: id.to_string(),
        source: anyhow!("store returned {status}"),
      });
    }
    debug!(%id, "Document written.");
    Ok(())
  }

  #[instrument(name = "catalog_store::read_all", skip(self), err(Display))]
  async fn read_all(&self) -> Result<Vec<(String, ListingFields)>, StoreError> {
    let response = self
      .client
      .get(self.collection_url())
      .send()
      .await
      .map_err(|transport_err| StoreError::ReadFailed {
        source: anyhow!(transport_err),
      })?;

    let status = response.status();
    if !status.is_success() {
      return Err(StoreError::ReadFailed {
        source: anyhow!("store returned {status}"),
      });
    }

    // An empty collection comes back as a literal `null` body. BTreeMap
    // gives the fetch a deterministic key order regardless of whatever
    // order the store answered in.
    let documents: Option<BTreeMap<String, ListingFields>> =
      response.json().await.map_err(|decode_err| StoreError::ReadFailed {
        source: anyhow!(decode_err),
      })?;
    let documents = documents.unwrap_or_default();
    debug!(count = documents.len(), "Collection fetched.");
    Ok(documents.into_iter().collect())
  }

  #[instrument(name = "catalog_store::read_one", skip(self), err(Display))]
  async fn read_one(&self, id: &str) -> Result<ListingFields, StoreError> {
    let response = self
      .client
      .get(self.document_url(id))
      .send()
      .await
      .map_err(|transport_err| StoreError::ReadFailed {
        source: anyhow!(transport_err),
      })?;

    let status = response.status();
    if !status.is_success() {
      return Err(StoreError::ReadFailed {
        source: anyhow!("store returned {status}"),
      });
    }

    let value: serde_json::Value =
      response.json().await.map_err(|decode_err| StoreError::ReadFailed {
        source: anyhow!(decode_err),
      })?;
    if value.is_null() {
      return Err(StoreError::NotFound { id: id.to_string() });
    }
    serde_json::from_value(value).map_err(|decode_err| StoreError::ReadFailed {
      source: anyhow!(decode_err),
    })
  }

  #[instrument(name = "catalog_store::delete", skip(self), err(Display))]
  async fn delete(&self, id: &str) -> Result<(), StoreError> {
    let response = self
      .client
      .delete(self.document_url(id))
      .send()
      .await
      .map_err(|transport_err| StoreError::DeleteFailed {
        id: id.to_string(),
        source: anyhow!(transport_err),
      })?;

    let status = response.status();
    // A store that answers 404 for an absent id still satisfies the
    // idempotent-delete contract.
    if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
      return Err(StoreError::DeleteFailed {
        id: id.to_string(),
        source: anyhow!("store returned {status}"),
      });
    }
    debug!(%id, "Document deleted.");
    Ok(())
  }
}
