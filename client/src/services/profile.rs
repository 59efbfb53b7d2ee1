//! Account, billing and security settings

use shared::{
    AccountData, AvatarUpload, BillingData, Notification, SecurityData, ValidationFailure,
};
use validator::Validate;

use crate::api::ProfileApi;
use crate::error::{ApiError, GENERIC_FAILURE};

/// Settings pages for the signed-in user
pub struct ProfileSettings<A> {
    api: A,
    account: AccountData,
}

impl<A: ProfileApi> ProfileSettings<A> {
    pub fn new(api: A, account: AccountData) -> Self {
        Self { api, account }
    }

    /// Last saved account details
    pub fn account(&self) -> &AccountData {
        &self.account
    }

    /// Avatar text shown while no image is set
    pub fn avatar_fallback(&self) -> String {
        self.account.fallback_initials()
    }

    /// Validate and save profile details, optionally with a new avatar image.
    ///
    /// Validation failures never reach the API.
    pub async fn save_account(
        &mut self,
        form: AccountData,
        avatar: Option<AvatarUpload>,
    ) -> Result<Notification, ValidationFailure> {
        form.validate()?;

        match self.api.update_account(&form, avatar.as_ref()).await {
            Ok(saved) => {
                tracing::info!(avatar = saved.avatar.is_some(), "account settings updated");
                let avatar = saved.avatar.clone().or_else(|| self.account.avatar.clone());
                self.account = AccountData { avatar, ..saved };
                Ok(Notification::success(
                    "Account settings updated",
                    "Your account settings have been updated successfully.",
                ))
            }
            Err(e) => {
                tracing::error!("Error updating account settings: {}", e);
                Ok(e.to_notification("Account settings update failed."))
            }
        }
    }

    pub async fn save_billing(&self, form: BillingData) -> Result<Notification, ValidationFailure> {
        form.validate()?;

        match self.api.update_billing(&form).await {
            Ok(()) => {
                tracing::info!("billing settings updated");
                Ok(Notification::success(
                    "Billing information updated",
                    "Your billing information has been updated successfully.",
                ))
            }
            Err(e) => {
                tracing::error!("Error updating billing settings: {}", e);
                Ok(e.to_notification("Billing settings update failed."))
            }
        }
    }

    pub async fn save_security(&self, form: SecurityData) -> Result<Notification, ValidationFailure> {
        form.validate()?;

        match self.api.update_security(&form).await {
            Ok(()) => {
                tracing::info!("security settings updated");
                Ok(Notification::success(
                    "Security settings updated",
                    "Your security settings have been updated successfully.",
                ))
            }
            // A rejected password change is reported as a form problem, not a server message
            Err(e) if !matches!(e, ApiError::Transport(_)) => {
                tracing::error!("Security settings rejected: {}", e);
                Ok(Notification::failure(
                    "Security settings failed to update.",
                    "Please make sure that all the details entered are correct.",
                ))
            }
            Err(e) => {
                tracing::error!("Error updating security settings: {}", e);
                Ok(Notification::failure("Security settings failed to update.", GENERIC_FAILURE))
            }
        }
    }
}
