//! Gallery editor: add, edit and delete gallery images.

use std::sync::Arc;

use super::Editing;
use crate::context::ContentContext;
use crate::defaults::CATEGORY_SUGGESTIONS;
use crate::model::{Entity, GalleryImage, ImageDraft};
use crate::store::StoreError;

pub struct GalleryEditor {
    content: Arc<ContentContext>,
    add_form: Option<ImageDraft>,
    editing: Option<Editing<ImageDraft>>,
}

impl GalleryEditor {
    pub fn new(content: Arc<ContentContext>) -> Self {
        Self {
            content,
            add_form: None,
            editing: None,
        }
    }

    pub fn images(&self) -> Vec<GalleryImage> {
        self.content.gallery()
    }

    pub fn category_suggestions(&self) -> &'static [&'static str] {
        &CATEGORY_SUGGESTIONS
    }

    // ------------------------------------------------------------------------
    // Add form
    // ------------------------------------------------------------------------

    /// Show the add form. A draft already in progress is kept.
    pub fn open_add_form(&mut self) {
        self.add_form.get_or_insert_with(ImageDraft::default);
    }

    /// Hide the add form and discard its draft.
    pub fn close_add_form(&mut self) {
        self.add_form = None;
    }

    pub fn add_form(&self) -> Option<&ImageDraft> {
        self.add_form.as_ref()
    }

    pub fn add_form_mut(&mut self) -> Option<&mut ImageDraft> {
        self.add_form.as_mut()
    }

    /// Whether the add control is enabled.
    pub fn can_add(&self) -> bool {
        self.add_form
            .as_ref()
            .is_some_and(GalleryImage::draft_is_complete)
    }

    /// Save the add-form draft as a new image.
    ///
    /// Returns the new identifier and closes the form. With no form open, or
    /// an incomplete draft, nothing happens and the form stays as it was.
    pub fn commit_add(&mut self) -> Result<Option<String>, StoreError> {
        if !self.can_add() {
            return Ok(None);
        }
        let Some(draft) = self.add_form.take() else {
            return Ok(None);
        };
        let id = self.content.add_image(draft)?;
        Ok(id)
    }

    // ------------------------------------------------------------------------
    // Edit form
    // ------------------------------------------------------------------------

    /// Copy the image with `id` into the edit slot. `false` if it does not
    /// exist.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.content.image(id) {
            Some(image) => {
                self.editing = Some(Editing {
                    id: image.id.clone(),
                    draft: image.to_draft(),
                });
                true
            }
            None => false,
        }
    }

    pub fn editing(&self) -> Option<&Editing<ImageDraft>> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut ImageDraft> {
        self.editing.as_mut().map(|editing| &mut editing.draft)
    }

    /// Write the edited image back.
    ///
    /// Returns `false`, keeping the slot open, when a field is empty. Returns
    /// `false` and clears the slot when the image was deleted meanwhile.
    pub fn commit_edit(&mut self) -> Result<bool, StoreError> {
        let Some(editing) = &self.editing else {
            return Ok(false);
        };
        if !GalleryImage::draft_is_complete(&editing.draft) {
            return Ok(false);
        }
        let image = GalleryImage::from_draft(editing.id.clone(), editing.draft.clone());
        let updated = self.content.update_image(image)?;
        self.editing = None;
        Ok(updated)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ------------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------------

    /// Delete immediately. An open edit of the same image is dropped.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.content.remove_image(id)?;
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        Ok(removed)
    }
}
