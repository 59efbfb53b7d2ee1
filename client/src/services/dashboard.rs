//! Business dashboard orchestrator
//!
//! Owns the business list, the selection and the dialogs around them.
//! Every mutation is pessimistic: local state changes only after the API
//! confirms it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shared::ui::{
    BusinessAction, BusinessActions, BusinessFormDialog, BusinessSelector, ConfirmPrompt,
    CreateBusinessWizard, FormMode, FormSubmission,
};
use shared::{Business, KeyValueStore, NewBusiness, Notification, SelectionStore};

use crate::api::BusinessApi;

/// Shown in place of the list when the initial fetch fails
pub const LOAD_FAILURE: &str = "Failed to load businesses.";

/// Dashboard loading state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Error(String),
}

/// Liveness flag shared between a dashboard and whoever tears it down
#[derive(Debug, Clone)]
pub struct MountHandle(Arc<AtomicBool>);

impl MountHandle {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Discard the results of any request still in flight
    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The dashboard: list, selection, switcher, dialog and action bar
pub struct Dashboard<A, S> {
    api: A,
    selection: SelectionStore<S>,
    businesses: Vec<Business>,
    status: LoadStatus,
    loaded: bool,
    mount: MountHandle,
    selector: BusinessSelector,
    form: BusinessFormDialog,
    actions: BusinessActions,
}

impl<A: BusinessApi, S: KeyValueStore> Dashboard<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            selection: SelectionStore::open(store),
            businesses: Vec::new(),
            status: LoadStatus::Loading,
            loaded: false,
            mount: MountHandle::new(),
            selector: BusinessSelector::new(),
            form: BusinessFormDialog::new(),
            actions: BusinessActions::new(),
        }
    }

    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub fn selected(&self) -> Option<&Business> {
        self.selection.selected()
    }

    pub fn selected_label(&self) -> &str {
        BusinessSelector::trigger_label(self.selected())
    }

    /// Fetch the list once; later calls are no-ops
    pub async fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.status = LoadStatus::Loading;

        let result = self.api.list_businesses().await;
        if !self.mount.is_mounted() {
            tracing::debug!("dashboard unmounted, dropping business list");
            return;
        }

        match result {
            Ok(businesses) => {
                tracing::info!(count = businesses.len(), "loaded businesses");
                self.selection.set_selected(businesses.first().cloned());
                self.businesses = businesses;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                tracing::error!("Error fetching businesses: {}", e);
                self.status = LoadStatus::Error(LOAD_FAILURE.to_string());
            }
        }
    }

    /// Select a business already in the list
    pub fn select(&mut self, id: i64) -> bool {
        match self.businesses.iter().find(|b| b.id == id) {
            Some(business) => {
                tracing::debug!(business_id = id, "business selected");
                self.selection.set_selected(Some(business.clone()));
                true
            }
            None => false,
        }
    }

    // Switcher

    pub fn selector(&self) -> &BusinessSelector {
        &self.selector
    }

    pub fn open_selector(&mut self) {
        self.selector.open();
    }

    pub fn close_selector(&mut self) {
        self.selector.close();
    }

    pub fn type_query(&mut self, query: impl Into<String>) {
        self.selector.set_query(query);
    }

    pub fn visible_businesses(&self) -> Vec<&Business> {
        self.selector.visible(&self.businesses)
    }

    pub fn selector_empty_state(&self) -> Option<&'static str> {
        self.selector.empty_state(&self.businesses)
    }

    /// Pick an entry from the open switcher
    pub fn choose(&mut self, id: i64) -> bool {
        let chosen = self.selector.choose(&self.businesses, id).cloned();
        match chosen {
            Some(business) => {
                self.selection.set_selected(Some(business));
                true
            }
            None => false,
        }
    }

    // Dialog and action bar

    pub fn form(&self) -> &BusinessFormDialog {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BusinessFormDialog {
        &mut self.form
    }

    pub fn can_modify(&self) -> bool {
        BusinessActions::can_modify(self.selected())
    }

    pub fn request_delete(&mut self) -> bool {
        let selected = self.selection.selected();
        self.actions.request_delete(selected)
    }

    pub fn delete_prompt(&self) -> Option<ConfirmPrompt> {
        self.actions.confirmation()
    }

    pub fn cancel_delete(&mut self) {
        self.actions.cancel_delete();
    }

    pub async fn confirm_delete(&mut self) -> Option<Notification> {
        let action = self.actions.confirm_delete()?;
        self.handle_action(action).await
    }

    pub fn edit_selected(&mut self) -> bool {
        match self.actions.edit(self.selection.selected()) {
            Some(action) => self.open_form(action).is_none(),
            None => false,
        }
    }

    pub fn create_new(&mut self) {
        let action = self.actions.create_new();
        self.open_form(action);
    }

    /// Open the dialog for edit/create intents; hands back anything else
    fn open_form(&mut self, action: BusinessAction) -> Option<BusinessAction> {
        match action {
            BusinessAction::Edit(business) => self.form.open(FormMode::Edit(business)),
            BusinessAction::CreateNew => self.form.open(FormMode::Create),
            other => return Some(other),
        }
        None
    }

    /// Route an action-bar intent
    pub async fn handle_action(&mut self, action: BusinessAction) -> Option<Notification> {
        match self.open_form(action)? {
            BusinessAction::Delete(id) => self.delete(id).await,
            BusinessAction::Edit(_) | BusinessAction::CreateNew => None,
        }
    }

    /// Validate the open dialog and persist it. Field errors stay on the form.
    pub async fn submit_form(&mut self) -> Option<Notification> {
        let submission = self.form.submit()?;
        let note = match submission {
            FormSubmission::Create(new) => self.create(&new).await,
            FormSubmission::Update(business) => self.update(&business).await,
        };
        if note.as_ref().is_some_and(|n| !n.is_failure()) {
            self.form.close();
        }
        note
    }

    /// Final step of the create wizard
    pub async fn submit_wizard(&mut self, wizard: &mut CreateBusinessWizard) -> Option<Notification> {
        let new = wizard.submit()?;
        let note = self.create(&new).await;
        wizard.finish_submit();
        note
    }

    // Mutations

    pub async fn create(&mut self, new: &NewBusiness) -> Option<Notification> {
        tracing::debug!(name = %new.name, "creating business");
        let result = self.api.create_business(new).await;
        if !self.mount.is_mounted() {
            return None;
        }

        match result {
            Ok(business) => {
                tracing::info!(business_id = business.id, "business created");
                self.businesses.push(business.clone());
                self.selection.set_selected(Some(business));
                Some(Notification::success("Success", "Successfully created business."))
            }
            Err(e) => {
                tracing::error!("Error creating business: {}", e);
                Some(e.to_notification("Failed to create business."))
            }
        }
    }

    pub async fn update(&mut self, business: &Business) -> Option<Notification> {
        tracing::debug!(business_id = business.id, "updating business");
        let result = self.api.update_business(business).await;
        if !self.mount.is_mounted() {
            return None;
        }

        match result {
            Ok(updated) => {
                tracing::info!(business_id = updated.id, "business updated");
                if let Some(slot) = self.businesses.iter_mut().find(|b| b.id == updated.id) {
                    *slot = updated.clone();
                }
                if self.selected().map(|b| b.id) == Some(updated.id) {
                    self.selection.set_selected(Some(updated));
                }
                Some(Notification::success("Success", "Successfully updated business."))
            }
            Err(e) => {
                tracing::error!("Error updating business: {}", e);
                Some(e.to_notification("Failed to update business."))
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Option<Notification> {
        tracing::debug!(business_id = id, "deleting business");
        let result = self.api.delete_business(id).await;
        if !self.mount.is_mounted() {
            return None;
        }

        match result {
            Ok(()) => {
                tracing::info!(business_id = id, "business deleted");
                self.businesses.retain(|b| b.id != id);
                if self.selected().map(|b| b.id) == Some(id) {
                    self.selection.set_selected(self.businesses.first().cloned());
                }
                Some(Notification::success("Success", "Successfully deleted business."))
            }
            Err(e) => {
                tracing::error!("Error deleting business: {}", e);
                Some(e.to_notification("Failed to delete business."))
            }
        }
    }
}
