//! Admin editors.
//!
//! One editor per collection. Editors hold form state only (the open add
//! form, the record being edited) and apply committed changes through the
//! shared [`ContentContext`](crate::context::ContentContext), so every other
//! consumer of the context sees the result straight away.
//!
//! | Editor | Collection |
//! |--------|------------|
//! | [`GalleryEditor`] | gallery images |
//! | [`PricingEditor`] | pricing plans |

pub mod gallery;
pub mod pricing;

pub use gallery::GalleryEditor;
pub use pricing::{PlanForm, PlanTarget, PricingEditor};

/// An existing record copied into an editable draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editing<D> {
    pub id: String,
    pub draft: D,
}
