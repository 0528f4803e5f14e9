// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use anyhow::anyhow;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use sokoni::{CatalogPipeline, CatalogStore, ImageHost, ListingFields, StoreError, UploadError};
use std::collections::BTreeMap;
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Mock Image Host ---

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadBehavior {
  /// Answer with the configured URL.
  Succeed,
  /// Simulate a transport-level or non-success-status failure.
  FailRequest,
  /// Simulate a success status whose body carries no secure_url.
  OmitUrl,
}

pub struct MockImageHost {
  url: String,
  behavior: Mutex<UploadBehavior>,
  pub upload_calls: AtomicUsize,
}

impl MockImageHost {
  pub fn returning(url: &str) -> Self {
    Self {
      url: url.to_string(),
      behavior: Mutex::new(UploadBehavior::Succeed),
      upload_calls: AtomicUsize::new(0),
    }
  }

  pub fn set_behavior(&self, behavior: UploadBehavior) {
    *self.behavior.lock() = behavior;
  }

  pub fn uploads(&self) -> usize {
    self.upload_calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ImageHost for MockImageHost {
  async fn upload(&self, bytes: &[u8], _filename: &str) -> Result<String, UploadError> {
    self.upload_calls.fetch_add(1, Ordering::SeqCst);
    if bytes.is_empty() {
      return Err(UploadError::ReadFailed);
    }
    match *self.behavior.lock() {
      UploadBehavior::Succeed => Ok(self.url.clone()),
      UploadBehavior::FailRequest => Err(UploadError::RequestFailed {
        source: anyhow!("simulated image host outage"),
      }),
      UploadBehavior::OmitUrl => Err(UploadError::UrlMissing),
    }
  }
}

// --- Mock Catalog Store ---

/// In-memory keyed collection with scripted keys and per-operation failure
/// toggles. Documents live in a BTreeMap so read_all has a deterministic
/// key order, like the HTTP impl.
pub struct MockCatalogStore {
  documents: Mutex<BTreeMap<String, ListingFields>>,
  scripted_keys: Mutex<Vec<String>>,
  key_counter: AtomicUsize,
  pub fail_writes: AtomicBool,
  pub fail_reads: AtomicBool,
  pub fail_deletes: AtomicBool,
  pub write_calls: AtomicUsize,
  pub read_all_calls: AtomicUsize,
  pub delete_calls: AtomicUsize,
}

impl MockCatalogStore {
  pub fn new() -> Self {
    Self {
      documents: Mutex::new(BTreeMap::new()),
      scripted_keys: Mutex::new(Vec::new()),
      key_counter: AtomicUsize::new(0),
      fail_writes: AtomicBool::new(false),
      fail_reads: AtomicBool::new(false),
      fail_deletes: AtomicBool::new(false),
      write_calls: AtomicUsize::new(0),
      read_all_calls: AtomicUsize::new(0),
      delete_calls: AtomicUsize::new(0),
    }
  }

  /// Makes the next `create_key` answer with `key` instead of a counter key.
  pub fn script_next_key(&self, key: &str) {
    self.scripted_keys.lock().push(key.to_string());
  }

  /// Plants a document directly, bypassing the call counters.
  pub fn seed(&self, id: &str, fields: ListingFields) {
    self.documents.lock().insert(id.to_string(), fields);
  }

  pub fn document(&self, id: &str) -> Option<ListingFields> {
    self.documents.lock().get(id).cloned()
  }

  pub fn document_count(&self) -> usize {
    self.documents.lock().len()
  }

  pub fn writes(&self) -> usize {
    self.write_calls.load(Ordering::SeqCst)
  }

  pub fn read_alls(&self) -> usize {
    self.read_all_calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CatalogStore for MockCatalogStore {
  async fn create_key(&self) -> Result<String, StoreError> {
    if let Some(key) = self.scripted_keys.lock().pop() {
      return Ok(key);
    }
    let n = self.key_counter.fetch_add(1, Ordering::SeqCst);
    Ok(format!("key-{n}"))
  }

  async fn write(&self, id: &str, fields: &ListingFields) -> Result<(), StoreError> {
    self.write_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StoreError::WriteFailed {
        id: id.to_string(),
        source: anyhow!("simulated store write outage"),
      });
    }
    self.documents.lock().insert(id.to_string(), fields.clone());
    Ok(())
  }

  async fn read_all(&self) -> Result<Vec<(String, ListingFields)>, StoreError> {
    self.read_all_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(StoreError::ReadFailed {
        source: anyhow!("simulated store read outage"),
      });
    }
    Ok(
      self
        .documents
        .lock()
        .iter()
        .map(|(id, fields)| (id.clone(), fields.clone()))
        .collect(),
    )
  }

  async fn read_one(&self, id: &str) -> Result<ListingFields, StoreError> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(StoreError::ReadFailed {
        source: anyhow!("simulated store read outage"),
      });
    }
    self
      .documents
      .lock()
      .get(id)
      .cloned()
      .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
  }

  async fn delete(&self, id: &str) -> Result<(), StoreError> {
    self.delete_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_deletes.load(Ordering::SeqCst) {
      return Err(StoreError::DeleteFailed {
        id: id.to_string(),
        source: anyhow!("simulated store delete outage"),
      });
    }
    // Removing an absent id is a success; delete is idempotent.
    self.documents.lock().remove(id);
    Ok(())
  }
}

// --- Pipeline wiring helper ---

pub fn build_pipeline(
  images: MockImageHost,
  store: MockCatalogStore,
) -> (CatalogPipeline, Arc<MockImageHost>, Arc<MockCatalogStore>) {
  let images = Arc::new(images);
  let store = Arc::new(store);
  let pipeline = CatalogPipeline::new(images.clone(), store.clone());
  (pipeline, images, store)
}

// --- Field fixtures ---

pub fn chair_fields() -> ListingFields {
  ListingFields {
    name: Some("Chair".to_string()),
    category: Some("furniture".to_string()),
    price: Some("1500".to_string()),
    description: Some("Solid oak".to_string()),
    stock_quantity: Some("4".to_string()),
    seller_phone: Some("+254700000000".to_string()),
    image_url: None,
  }
}

pub const VALID_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
