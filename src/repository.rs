//! In-memory collections backed by the store.
//!
//! A [`Repository`] owns one collection (gallery images or pricing plans).
//! It is loaded from the store once; if the store has nothing usable under
//! the collection's key, the built-in defaults are adopted and written back
//! immediately, so from then on the store is authoritative.
//!
//! Every mutation writes the **whole** collection, never a diff. The new
//! collection is persisted first and only adopted in memory once the write
//! succeeds, so a failed write leaves memory and store in agreement.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ids::IdGenerator;
use crate::model::Entity;
use crate::store::{Store, StoreError, read_json, write_json};

pub struct Repository<T: Entity> {
    store: Arc<dyn Store>,
    ids: Arc<dyn IdGenerator>,
    items: Vec<T>,
}

impl<T: Entity> Repository<T> {
    /// Load the collection, seeding the defaults on first run.
    pub fn load(store: Arc<dyn Store>, ids: Arc<dyn IdGenerator>) -> Result<Self, StoreError> {
        let items = match read_json::<Vec<T>>(store.as_ref(), T::STORE_KEY)? {
            Some(items) => {
                tracing::debug!(kind = T::KIND, count = items.len(), "loaded collection");
                items
            }
            None => {
                let defaults = T::defaults();
                write_json(store.as_ref(), T::STORE_KEY, &defaults)?;
                tracing::info!(kind = T::KIND, count = defaults.len(), "seeded default collection");
                defaults
            }
        };
        Ok(Self { store, ids, items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new record built from `draft`.
    ///
    /// Returns the assigned identifier, or `None` without touching anything
    /// when a required field is empty.
    pub fn add(&mut self, draft: T::Draft) -> Result<Option<String>, StoreError> {
        if !T::draft_is_complete(&draft) {
            tracing::debug!(kind = T::KIND, "rejected incomplete draft");
            return Ok(None);
        }
        let id = self.fresh_id();
        let mut next = self.items.clone();
        next.push(T::from_draft(id.clone(), draft));
        self.commit(next)?;
        tracing::info!(kind = T::KIND, id = %id, "added");
        Ok(Some(id))
    }

    /// Replace the record with the same identifier. `false` if there is none.
    pub fn update(&mut self, item: T) -> Result<bool, StoreError> {
        let Some(pos) = self.position(item.id()) else {
            return Ok(false);
        };
        let id = item.id().to_string();
        let mut next = self.items.clone();
        next[pos] = item;
        self.commit(next)?;
        tracing::info!(kind = T::KIND, id = %id, "updated");
        Ok(true)
    }

    /// Drop the record with identifier `id`. `false` if there is none.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.position(id).is_none() {
            return Ok(false);
        }
        let next: Vec<T> = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        self.commit(next)?;
        tracing::info!(kind = T::KIND, id, "removed");
        Ok(true)
    }

    /// Replace the whole collection.
    ///
    /// Records repeating an earlier identifier are dropped so identifiers
    /// stay unique.
    pub fn replace_all(&mut self, items: Vec<T>) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        let mut next = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.id().to_string()) {
                next.push(item);
            } else {
                tracing::warn!(kind = T::KIND, id = item.id(), "dropping duplicate identifier");
            }
        }
        self.commit(next)
    }

    /// Go back to the built-in defaults.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.commit(T::defaults())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, next: Vec<T>) -> Result<(), StoreError> {
        write_json(self.store.as_ref(), T::STORE_KEY, &next)?;
        self.items = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::ids::Sequential;
    use crate::model::{GalleryImage, ImageDraft, PlanDraft, PricingPlan};
    use crate::store::{GALLERY_KEY, MemoryStore, PRICING_KEY};
    use crate::test_helpers::*;
    use proptest::prelude::*;

    fn gallery_repo(store: &Arc<MemoryStore>) -> Repository<GalleryImage> {
        Repository::load(store.clone(), Arc::new(Sequential::new("new-"))).unwrap()
    }

    #[test]
    fn first_load_seeds_and_persists_defaults() {
        let store = Arc::new(MemoryStore::new());
        let repo = gallery_repo(&store);

        assert_eq!(repo.items(), defaults::gallery().as_slice());
        assert_eq!(stored_gallery(&store), defaults::gallery());
    }

    #[test]
    fn pricing_seeds_three_plans() {
        let store = Arc::new(MemoryStore::new());
        let repo: Repository<PricingPlan> =
            Repository::load(store.clone(), Arc::new(Sequential::new("p"))).unwrap();
        assert_eq!(repo.len(), 3);
        assert_eq!(stored_pricing(&store), defaults::pricing());
    }

    #[test]
    fn existing_collection_is_adopted_not_reseeded() {
        let store = Arc::new(MemoryStore::new());
        store.set(GALLERY_KEY, "[]").unwrap();

        let repo = gallery_repo(&store);
        assert!(repo.is_empty());
        assert_eq!(store.get(GALLERY_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn malformed_collection_falls_back_to_defaults() {
        let store = Arc::new(MemoryStore::new());
        store.set(PRICING_KEY, "{{{").unwrap();

        let repo: Repository<PricingPlan> =
            Repository::load(store.clone(), Arc::new(Sequential::new("p"))).unwrap();
        assert_eq!(repo.items(), defaults::pricing().as_slice());
        assert_eq!(stored_pricing(&store), defaults::pricing());
    }

    #[test]
    fn add_appends_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);

        let id = repo.add(test_image_draft()).unwrap().expect("draft is complete");
        assert_eq!(repo.len(), 7);
        assert_eq!(repo.items().last().unwrap().id, id);
        assert_eq!(repo.get(&id).unwrap().alt, "Test");
        assert_eq!(stored_gallery(&store), repo.items());
    }

    #[test]
    fn add_rejects_incomplete_draft_without_writing() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);
        let before = store.get(GALLERY_KEY).unwrap();

        let result = repo.add(ImageDraft::new("http://x/1.jpg", "", "Wedding")).unwrap();
        assert!(result.is_none());
        assert_eq!(repo.len(), 6);
        assert_eq!(store.get(GALLERY_KEY).unwrap(), before);
    }

    #[test]
    fn add_skips_generated_ids_already_in_use() {
        let store = Arc::new(MemoryStore::new());
        // Defaults use ids "1".."6"; an unprefixed counter would collide.
        let mut repo: Repository<GalleryImage> =
            Repository::load(store.clone(), Arc::new(Sequential::new(""))).unwrap();

        let id = repo.add(test_image_draft()).unwrap().unwrap();
        assert_eq!(id, "7");
        assert_eq!(assert_unique_ids(repo.items()), 7);
    }

    #[test]
    fn update_replaces_in_place() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);

        let mut edited = repo.get("3").unwrap().clone();
        edited.alt = "Mountains at dusk".to_string();
        assert!(repo.update(edited.clone()).unwrap());

        assert_eq!(repo.len(), 6);
        assert_eq!(repo.items()[2], edited);
        assert_eq!(stored_gallery(&store)[2], edited);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);

        let ghost = GalleryImage {
            id: "ghost".to_string(),
            src: "http://x/g.jpg".to_string(),
            alt: "Ghost".to_string(),
            category: "Event".to_string(),
        };
        assert!(!repo.update(ghost).unwrap());
        assert_eq!(repo.items(), defaults::gallery().as_slice());
    }

    #[test]
    fn remove_filters_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);

        assert!(repo.remove("2").unwrap());
        assert_eq!(repo.len(), 5);
        assert!(repo.get("2").is_none());
        assert_eq!(stored_gallery(&store).len(), 5);
    }

    #[test]
    fn remove_absent_id_leaves_collection_alone() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);
        assert!(!repo.remove("nope").unwrap());
        assert_eq!(repo.len(), 6);
    }

    #[test]
    fn fresh_repository_sees_same_collection_in_order() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);
        repo.remove("1").unwrap();
        repo.add(test_image_draft()).unwrap();

        let reloaded = gallery_repo(&store);
        assert_eq!(reloaded.items(), repo.items());
    }

    #[test]
    fn replace_all_drops_duplicate_ids() {
        let store = Arc::new(MemoryStore::new());
        let mut repo = gallery_repo(&store);

        let mut images = defaults::gallery();
        let mut dup = images[0].clone();
        dup.alt = "second copy".to_string();
        images.push(dup);

        repo.replace_all(images).unwrap();
        assert_eq!(repo.len(), 6);
        assert_eq!(repo.get("1").unwrap().alt, "Wedding photography");
    }

    #[test]
    fn reset_restores_defaults() {
        let store = Arc::new(MemoryStore::new());
        let mut repo: Repository<PricingPlan> =
            Repository::load(store.clone(), Arc::new(Sequential::new("p"))).unwrap();
        repo.remove("1").unwrap();
        repo.add(PlanDraft::new_package()).unwrap();

        repo.reset().unwrap();
        assert_eq!(repo.items(), defaults::pricing().as_slice());
        assert_eq!(stored_pricing(&store), defaults::pricing());
    }

    #[test]
    fn negative_price_plan_is_accepted() {
        let store = Arc::new(MemoryStore::new());
        let mut repo: Repository<PricingPlan> =
            Repository::load(store.clone(), Arc::new(Sequential::new("p"))).unwrap();
        let draft = PlanDraft {
            price: -5,
            ..PlanDraft::new_package()
        };
        let id = repo.add(draft).unwrap().unwrap();
        assert_eq!(repo.get(&id).unwrap().price, -5);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(bool),
        Remove(usize),
        RemoveMissing,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Add),
            (0usize..16).prop_map(Op::Remove),
            Just(Op::RemoveMissing),
        ]
    }

    proptest! {
        #[test]
        fn sizes_track_adds_and_removes(ops in proptest::collection::vec(op(), 0..24)) {
            let store = Arc::new(MemoryStore::new());
            let mut repo = gallery_repo(&store);

            for op in ops {
                let before = repo.len();
                match op {
                    Op::Add(complete) => {
                        let draft = if complete {
                            test_image_draft()
                        } else {
                            ImageDraft::default()
                        };
                        let added = repo.add(draft).unwrap();
                        prop_assert_eq!(added.is_some(), complete);
                        if let Some(id) = added {
                            prop_assert_eq!(repo.len(), before + 1);
                            prop_assert!(repo.get(&id).is_some());
                        } else {
                            prop_assert_eq!(repo.len(), before);
                        }
                    }
                    Op::Remove(index) => {
                        let target = repo.items().get(index).map(|i| i.id.clone());
                        if let Some(id) = target {
                            prop_assert!(repo.remove(&id).unwrap());
                            prop_assert_eq!(repo.len(), before - 1);
                            prop_assert!(repo.get(&id).is_none());
                        }
                    }
                    Op::RemoveMissing => {
                        prop_assert!(!repo.remove("missing").unwrap());
                        prop_assert_eq!(repo.len(), before);
                    }
                }
                prop_assert_eq!(stored_gallery(&store), repo.items().to_vec());
            }
        }
    }
}
