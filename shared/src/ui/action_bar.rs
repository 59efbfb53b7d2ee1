//! Edit / delete / create-new controls

use crate::models::Business;

/// Intent emitted by the action bar
#[derive(Debug, Clone, PartialEq)]
pub enum BusinessAction {
    Edit(Business),
    Delete(i64),
    CreateNew,
}

/// Text of the delete confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: &'static str,
    pub description: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

pub const DELETE_PROMPT: ConfirmPrompt = ConfirmPrompt {
    title: "Are you sure?",
    description: "This action cannot be undone. This will permanently delete the business and all its data.",
    confirm_label: "Delete",
    cancel_label: "Cancel",
};

/// Action bar state; only the delete confirmation needs remembering
#[derive(Debug, Clone, Default)]
pub struct BusinessActions {
    pending_delete: Option<i64>,
}

impl BusinessActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit and delete need a selection
    pub fn can_modify(selected: Option<&Business>) -> bool {
        selected.is_some()
    }

    pub fn edit(&self, selected: Option<&Business>) -> Option<BusinessAction> {
        selected.map(|b| BusinessAction::Edit(b.clone()))
    }

    pub fn create_new(&self) -> BusinessAction {
        BusinessAction::CreateNew
    }

    /// First step of delete: show the prompt. Returns false with nothing selected.
    pub fn request_delete(&mut self, selected: Option<&Business>) -> bool {
        match selected {
            Some(b) => {
                self.pending_delete = Some(b.id);
                true
            }
            None => false,
        }
    }

    /// Prompt currently shown, if any
    pub fn confirmation(&self) -> Option<ConfirmPrompt> {
        self.pending_delete.map(|_| DELETE_PROMPT)
    }

    /// Second step of delete: only an explicit confirmation yields the intent
    pub fn confirm_delete(&mut self) -> Option<BusinessAction> {
        self.pending_delete.take().map(BusinessAction::Delete)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
