// core/src/cache.rs

//! The Catalog Cache: a client-held, display-authoritative projection of
//! the remote collection.
//!
//! The cache is an ordered, id-deduplicated container behind a clonable
//! handle. The pipeline is its only writer; the UI collaborator holds a
//! clone of the handle and reads snapshots. Reads always reflect the last
//! completed mutation, never a partially applied one.

use crate::listing::Listing;
use parking_lot::RwLock;
use std::sync::Arc;

/// Clonable handle to the shared catalog projection.
///
/// Lock guards are internal and blocking, and are never held across an
/// `.await` suspension point.
#[derive(Debug, Default)]
pub struct CatalogCache(Arc<RwLock<Vec<Listing>>>);

impl CatalogCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replaces the entire contents with `listings`, preserving their order.
  /// On a duplicate id the later entry wins, keeping the earlier entry's
  /// position.
  pub fn replace_all(&self, listings: Vec<Listing>) {
    let mut deduped: Vec<Listing> = Vec::with_capacity(listings.len());
    for listing in listings {
      match deduped.iter_mut().find(|entry| entry.id == listing.id) {
        Some(existing) => *existing = listing,
        None => deduped.push(listing),
      }
    }
    *self.0.write() = deduped;
  }

  /// Inserts `listing`, or replaces the entry already holding its id in
  /// place. Not used by the base flows, but available to callers that want
  /// a local echo of a single known-good record.
  pub fn upsert(&self, listing: Listing) {
    let mut guard = self.0.write();
    match guard.iter_mut().find(|entry| entry.id == listing.id) {
      Some(existing) => *existing = listing,
      None => guard.push(listing),
    }
  }

  /// Removes the entry with `id`, reporting whether one was present.
  pub fn evict(&self, id: &str) -> bool {
    let mut guard = self.0.write();
    let before = guard.len();
    guard.retain(|entry| entry.id != id);
    guard.len() != before
  }

  /// An owned copy of the current contents, detached from later mutations.
  pub fn snapshot(&self) -> Vec<Listing> {
    self.0.read().clone()
  }

  pub fn get(&self, id: &str) -> Option<Listing> {
    self.0.read().iter().find(|entry| entry.id == id).cloned()
  }

  pub fn len(&self) -> usize {
    self.0.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.read().is_empty()
  }
}

impl Clone for CatalogCache {
  fn clone(&self) -> Self {
    CatalogCache(Arc::clone(&self.0))
  }
}
