//! Shared test utilities for the unit test suite.
//!
//! Provides store fixtures, sample drafts and lookups that panic with a
//! useful message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (store, content) = memory_context();
//! content.add_image(test_image_draft()).unwrap();
//!
//! let image = find_image(&content.gallery(), "Test");
//! assert_eq!(stored_gallery(&store).len(), 7);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::context::ContentContext;
use crate::ids::Sequential;
use crate::model::{Entity, GalleryImage, ImageDraft, PricingPlan};
use crate::store::{GALLERY_KEY, MemoryStore, PRICING_KEY, Store};

// =========================================================================
// Fixture setup
// =========================================================================

/// A fresh in-memory store and a content context loaded from it.
///
/// Ids come from a `new-` prefixed counter so they never collide with the
/// numeric default ids.
pub fn memory_context() -> (Arc<MemoryStore>, Arc<ContentContext>) {
    let store = Arc::new(MemoryStore::new());
    let content = ContentContext::load(store.clone(), Arc::new(Sequential::new("new-"))).unwrap();
    (store, Arc::new(content))
}

/// Like [`memory_context`], but with both collections starting empty.
pub fn empty_context() -> (Arc<MemoryStore>, Arc<ContentContext>) {
    let store = Arc::new(MemoryStore::new());
    store.set(GALLERY_KEY, "[]").unwrap();
    store.set(PRICING_KEY, "[]").unwrap();
    let content = ContentContext::load(store.clone(), Arc::new(Sequential::new("new-"))).unwrap();
    (store, Arc::new(content))
}

pub fn test_image_draft() -> ImageDraft {
    ImageDraft::new("http://x/1.jpg", "Test", "Wedding")
}

// =========================================================================
// Store inspection
// =========================================================================

/// Gallery collection as currently persisted. Panics if absent or invalid.
pub fn stored_gallery(store: &MemoryStore) -> Vec<GalleryImage> {
    stored(store, GALLERY_KEY)
}

/// Pricing collection as currently persisted. Panics if absent or invalid.
pub fn stored_pricing(store: &MemoryStore) -> Vec<PricingPlan> {
    stored(store, PRICING_KEY)
}

fn stored<T: serde::de::DeserializeOwned>(store: &MemoryStore, key: &str) -> Vec<T> {
    let raw = store
        .get(key)
        .unwrap()
        .unwrap_or_else(|| panic!("nothing stored under '{key}'"));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("invalid JSON under '{key}': {e}"))
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a gallery image by alt text. Panics if not found.
pub fn find_image<'a>(images: &'a [GalleryImage], alt: &str) -> &'a GalleryImage {
    images.iter().find(|i| i.alt == alt).unwrap_or_else(|| {
        let alts: Vec<&str> = images.iter().map(|i| i.alt.as_str()).collect();
        panic!("image '{alt}' not found. Available: {alts:?}")
    })
}

/// Find a pricing plan by name. Panics if not found.
pub fn find_plan<'a>(plans: &'a [PricingPlan], name: &str) -> &'a PricingPlan {
    plans.iter().find(|p| p.name == name).unwrap_or_else(|| {
        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        panic!("plan '{name}' not found. Available: {names:?}")
    })
}

/// Assert identifiers are unique and return the collection size.
pub fn assert_unique_ids<T: Entity>(items: &[T]) -> usize {
    let ids: HashSet<&str> = items.iter().map(|i| i.id()).collect();
    assert_eq!(ids.len(), items.len(), "duplicate identifiers in collection");
    items.len()
}
