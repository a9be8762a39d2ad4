//! Content entities: gallery images and pricing plans.
//!
//! Both are stored as JSON arrays (see [`crate::store`]) and managed by a
//! [`Repository`](crate::repository::Repository). The field names on the wire
//! are the ones the site has always persisted, so a store written by an
//! older build loads unchanged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::store::{GALLERY_KEY, PRICING_KEY};

/// A record kind that lives in its own persisted collection.
///
/// New records start life as a `Draft` (everything but the identifier). The
/// repository refuses drafts that fail [`Entity::draft_is_complete`] and
/// assigns the identifier itself.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Clone + Default;

    /// Store key holding the collection.
    const STORE_KEY: &'static str;
    /// Human-readable kind, for log lines.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Built-in collection used when the store has none.
    fn defaults() -> Vec<Self>;

    /// All required fields are present.
    fn draft_is_complete(draft: &Self::Draft) -> bool;

    fn from_draft(id: String, draft: Self::Draft) -> Self;

    fn to_draft(&self) -> Self::Draft;
}

fn present(value: &str) -> bool {
    !value.is_empty()
}

// ============================================================================
// Gallery
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    /// Image URI.
    pub src: String,
    /// Alt text, also shown as the caption.
    pub alt: String,
    /// Free-text category label.
    pub category: String,
}

/// A gallery image before it has an identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDraft {
    pub src: String,
    pub alt: String,
    pub category: String,
}

impl ImageDraft {
    pub fn new(src: impl Into<String>, alt: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            category: category.into(),
        }
    }
}

impl Entity for GalleryImage {
    type Draft = ImageDraft;

    const STORE_KEY: &'static str = GALLERY_KEY;
    const KIND: &'static str = "gallery image";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        defaults::gallery()
    }

    fn draft_is_complete(draft: &ImageDraft) -> bool {
        present(&draft.src) && present(&draft.alt) && present(&draft.category)
    }

    fn from_draft(id: String, draft: ImageDraft) -> Self {
        Self {
            id,
            src: draft.src,
            alt: draft.alt,
            category: draft.category,
        }
    }

    fn to_draft(&self) -> ImageDraft {
        ImageDraft::new(&self.src, &self.alt, &self.category)
    }
}

// ============================================================================
// Pricing
// ============================================================================

/// Card color theme for a pricing plan.
///
/// Persisted as `"amber"` / `"neutral"`; `"accent"` is accepted on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanColor {
    #[serde(rename = "amber", alias = "accent")]
    Accent,
    #[default]
    #[serde(rename = "neutral")]
    Neutral,
}

impl PlanColor {
    pub const ALL: [PlanColor; 2] = [PlanColor::Accent, PlanColor::Neutral];

    pub fn as_str(self) -> &'static str {
        match self {
            PlanColor::Accent => "amber",
            PlanColor::Neutral => "neutral",
        }
    }
}

impl fmt::Display for PlanColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amber" | "accent" => Ok(PlanColor::Accent),
            "neutral" => Ok(PlanColor::Neutral),
            other => Err(format!("unknown plan color '{other}' (expected accent or neutral)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub id: String,
    pub name: String,
    /// Whole currency units. No floor is enforced.
    pub price: i64,
    pub description: String,
    /// Included features, in display order.
    pub features: Vec<String>,
    /// Excluded features, in display order.
    pub not_included: Vec<String>,
    pub popular: bool,
    pub color: PlanColor,
}

/// A pricing plan before it has an identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanDraft {
    pub name: String,
    pub price: i64,
    pub description: String,
    pub features: Vec<String>,
    pub not_included: Vec<String>,
    pub popular: bool,
    pub color: PlanColor,
}

impl PlanDraft {
    /// The preset the pricing editor opens a new plan with.
    pub fn new_package() -> Self {
        Self {
            name: "New Package".to_string(),
            price: 0,
            description: "Package description".to_string(),
            features: vec!["Feature 1".to_string()],
            not_included: Vec::new(),
            popular: false,
            color: PlanColor::Neutral,
        }
    }
}

impl Entity for PricingPlan {
    type Draft = PlanDraft;

    const STORE_KEY: &'static str = PRICING_KEY;
    const KIND: &'static str = "pricing plan";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        defaults::pricing()
    }

    fn draft_is_complete(draft: &PlanDraft) -> bool {
        present(&draft.name)
    }

    fn from_draft(id: String, draft: PlanDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            features: draft.features,
            not_included: draft.not_included,
            popular: draft.popular,
            color: draft.color,
        }
    }

    fn to_draft(&self) -> PlanDraft {
        PlanDraft {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            features: self.features.clone(),
            not_included: self.not_included.clone(),
            popular: self.popular,
            color: self.color,
        }
    }
}
