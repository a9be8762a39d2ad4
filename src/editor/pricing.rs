//! Pricing editor: one form for both new and existing plans.
//!
//! The form knows whether it is creating or editing through [`PlanTarget`],
//! so a new plan is always appended and an existing one is always replaced
//! in place.

use std::sync::Arc;

use crate::context::ContentContext;
use crate::model::{Entity, PlanDraft, PricingPlan};
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanTarget {
    New,
    Existing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanForm {
    pub target: PlanTarget,
    pub draft: PlanDraft,
}

pub struct PricingEditor {
    content: Arc<ContentContext>,
    form: Option<PlanForm>,
}

impl PricingEditor {
    pub fn new(content: Arc<ContentContext>) -> Self {
        Self {
            content,
            form: None,
        }
    }

    pub fn plans(&self) -> Vec<PricingPlan> {
        self.content.pricing()
    }

    /// Open the form with the "New Package" preset, replacing any open form.
    pub fn open_add_form(&mut self) {
        self.form = Some(PlanForm {
            target: PlanTarget::New,
            draft: PlanDraft::new_package(),
        });
    }

    /// Open the form on a copy of the plan with `id`. `false` if it does not
    /// exist.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(plan) = self.content.plan(id) else {
            return false;
        };
        self.form = Some(PlanForm {
            target: PlanTarget::Existing(plan.id.clone()),
            draft: plan.to_draft(),
        });
        true
    }

    pub fn form(&self) -> Option<&PlanForm> {
        self.form.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut PlanDraft> {
        self.form.as_mut().map(|form| &mut form.draft)
    }

    pub fn push_feature(&mut self, feature: &str) {
        if let Some(draft) = self.draft_mut() {
            push_entry(&mut draft.features, feature);
        }
    }

    pub fn remove_feature(&mut self, index: usize) {
        if let Some(draft) = self.draft_mut() {
            remove_entry(&mut draft.features, index);
        }
    }

    pub fn push_not_included(&mut self, item: &str) {
        if let Some(draft) = self.draft_mut() {
            push_entry(&mut draft.not_included, item);
        }
    }

    pub fn remove_not_included(&mut self, index: usize) {
        if let Some(draft) = self.draft_mut() {
            remove_entry(&mut draft.not_included, index);
        }
    }

    /// Save the form.
    ///
    /// Returns the identifier of the plan written, or `None` when there was
    /// nothing to save (no form, an empty name, or a plan deleted while it
    /// was being edited). The form closes unless the name is empty.
    pub fn commit(&mut self) -> Result<Option<String>, StoreError> {
        let Some(form) = &self.form else {
            return Ok(None);
        };
        if !PricingPlan::draft_is_complete(&form.draft) {
            return Ok(None);
        }
        let written = match &form.target {
            PlanTarget::New => self.content.add_plan(form.draft.clone())?,
            PlanTarget::Existing(id) => {
                let plan = PricingPlan::from_draft(id.clone(), form.draft.clone());
                self.content.update_plan(plan)?.then(|| id.clone())
            }
        };
        self.form = None;
        Ok(written)
    }

    pub fn cancel(&mut self) {
        self.form = None;
    }

    /// Delete immediately. A form open on the same plan is closed.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let removed = self.content.remove_plan(id)?;
        if self
            .form
            .as_ref()
            .is_some_and(|form| form.target == PlanTarget::Existing(id.to_string()))
        {
            self.form = None;
        }
        Ok(removed)
    }
}

fn push_entry(list: &mut Vec<String>, entry: &str) {
    if !entry.is_empty() {
        list.push(entry.to_string());
    }
}

fn remove_entry(list: &mut Vec<String>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}
