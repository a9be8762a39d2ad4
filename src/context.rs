//! The shared content service.
//!
//! [`ContentContext`] holds the one authoritative in-memory copy of each
//! collection. Every consumer (the admin editors, the public renderer, the
//! CLI) goes through the same `Arc<ContentContext>` instead of reading the
//! store on its own, so a change made by an editor is what the next render
//! sees.
//!
//! Consumers that need to react to changes call [`ContentContext::subscribe`]
//! and receive a [`ContentEvent`] after every successful mutation. Rejected
//! drafts and no-op updates/removals do not notify.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, RwLock};

use crate::ids::IdGenerator;
use crate::model::{Entity, GalleryImage, ImageDraft, PlanDraft, PricingPlan};
use crate::repository::Repository;
use crate::store::{Store, StoreError};

/// Emitted after a collection changed. Carries the new collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEvent {
    GalleryChanged { count: usize },
    PricingChanged { count: usize },
}

/// Point-in-time copy of both collections, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSnapshot {
    pub gallery: Vec<GalleryImage>,
    pub pricing: Vec<PricingPlan>,
}

pub struct ContentContext {
    gallery: RwLock<Repository<GalleryImage>>,
    pricing: RwLock<Repository<PricingPlan>>,
    subscribers: Mutex<Vec<Sender<ContentEvent>>>,
}

impl ContentContext {
    /// Load both collections from `store`, seeding defaults where absent.
    pub fn load(store: Arc<dyn Store>, ids: Arc<dyn IdGenerator>) -> Result<Self, StoreError> {
        let gallery = Repository::load(Arc::clone(&store), Arc::clone(&ids))?;
        let pricing = Repository::load(store, ids)?;
        Ok(Self {
            gallery: RwLock::new(gallery),
            pricing: RwLock::new(pricing),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub fn gallery(&self) -> Vec<GalleryImage> {
        read(&self.gallery, |repo| repo.items().to_vec())
    }

    pub fn pricing(&self) -> Vec<PricingPlan> {
        read(&self.pricing, |repo| repo.items().to_vec())
    }

    pub fn image(&self, id: &str) -> Option<GalleryImage> {
        read(&self.gallery, |repo| repo.get(id).cloned())
    }

    pub fn plan(&self, id: &str) -> Option<PricingPlan> {
        read(&self.pricing, |repo| repo.get(id).cloned())
    }

    pub fn snapshot(&self) -> ContentSnapshot {
        ContentSnapshot {
            gallery: self.gallery(),
            pricing: self.pricing(),
        }
    }

    /// Receive a [`ContentEvent`] for every future change.
    ///
    /// Dropping the receiver unsubscribes; the sender is pruned on the next
    /// notification.
    pub fn subscribe(&self) -> Receiver<ContentEvent> {
        let (tx, rx) = mpsc::channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(tx),
            Err(poisoned) => poisoned.into_inner().push(tx),
        }
        rx
    }

    // ------------------------------------------------------------------------
    // Gallery
    // ------------------------------------------------------------------------

    pub fn add_image(&self, draft: ImageDraft) -> Result<Option<String>, StoreError> {
        let (id, count) = mutate(&self.gallery, |repo| repo.add(draft))?;
        if id.is_some() {
            self.notify(ContentEvent::GalleryChanged { count });
        }
        Ok(id)
    }

    pub fn update_image(&self, image: GalleryImage) -> Result<bool, StoreError> {
        let (updated, count) = mutate(&self.gallery, |repo| repo.update(image))?;
        if updated {
            self.notify(ContentEvent::GalleryChanged { count });
        }
        Ok(updated)
    }

    pub fn remove_image(&self, id: &str) -> Result<bool, StoreError> {
        let (removed, count) = mutate(&self.gallery, |repo| repo.remove(id))?;
        if removed {
            self.notify(ContentEvent::GalleryChanged { count });
        }
        Ok(removed)
    }

    pub fn replace_gallery(&self, images: Vec<GalleryImage>) -> Result<(), StoreError> {
        let ((), count) = mutate(&self.gallery, |repo| repo.replace_all(images))?;
        self.notify(ContentEvent::GalleryChanged { count });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Pricing
    // ------------------------------------------------------------------------

    pub fn add_plan(&self, draft: PlanDraft) -> Result<Option<String>, StoreError> {
        let (id, count) = mutate(&self.pricing, |repo| repo.add(draft))?;
        if id.is_some() {
            self.notify(ContentEvent::PricingChanged { count });
        }
        Ok(id)
    }

    pub fn update_plan(&self, plan: PricingPlan) -> Result<bool, StoreError> {
        let (updated, count) = mutate(&self.pricing, |repo| repo.update(plan))?;
        if updated {
            self.notify(ContentEvent::PricingChanged { count });
        }
        Ok(updated)
    }

    pub fn remove_plan(&self, id: &str) -> Result<bool, StoreError> {
        let (removed, count) = mutate(&self.pricing, |repo| repo.remove(id))?;
        if removed {
            self.notify(ContentEvent::PricingChanged { count });
        }
        Ok(removed)
    }

    pub fn replace_pricing(&self, plans: Vec<PricingPlan>) -> Result<(), StoreError> {
        let ((), count) = mutate(&self.pricing, |repo| repo.replace_all(plans))?;
        self.notify(ContentEvent::PricingChanged { count });
        Ok(())
    }

    /// Put both collections back to the built-in defaults.
    pub fn reset(&self) -> Result<(), StoreError> {
        let ((), gallery) = mutate(&self.gallery, Repository::reset)?;
        self.notify(ContentEvent::GalleryChanged { count: gallery });
        let ((), pricing) = mutate(&self.pricing, Repository::reset)?;
        self.notify(ContentEvent::PricingChanged { count: pricing });
        Ok(())
    }

    fn notify(&self, event: ContentEvent) {
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.retain(|tx| tx.send(event).is_ok());
        tracing::trace!(?event, subscribers = subscribers.len(), "notified");
    }
}

fn read<T: Entity, R>(lock: &RwLock<Repository<T>>, f: impl FnOnce(&Repository<T>) -> R) -> R {
    match lock.read() {
        Ok(repo) => f(&*repo),
        Err(poisoned) => f(&*poisoned.into_inner()),
    }
}

/// Run `f` under the write lock; returns its result and the new size.
fn mutate<T: Entity, R>(
    lock: &RwLock<Repository<T>>,
    f: impl FnOnce(&mut Repository<T>) -> Result<R, StoreError>,
) -> Result<(R, usize), StoreError> {
    let mut repo = lock.write().map_err(|_| StoreError::Poisoned)?;
    let result = f(&mut *repo)?;
    Ok((result, repo.len()))
}
