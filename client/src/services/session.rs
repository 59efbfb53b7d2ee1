//! Sign-in, registration, contact form and logout

use shared::{
    ContactMessage, KeyValueStore, LoginData, Notification, RegisterData, SelectionStore,
    ValidationFailure,
};
use validator::Validate;

use crate::api::{SessionApi, SessionTokens};
use crate::error::{ApiError, GENERIC_FAILURE};

/// Result of a sign-in attempt; tokens only on success
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub notification: Notification,
    pub tokens: Option<SessionTokens>,
}

pub struct SessionService<A> {
    api: A,
}

impl<A: SessionApi> SessionService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn login(&self, form: LoginData) -> Result<LoginOutcome, ValidationFailure> {
        form.validate()?;

        Ok(match self.api.login(&form).await {
            Ok(tokens) => {
                tracing::info!(email = %form.email, "signed in");
                LoginOutcome {
                    notification: Notification::success("Success", "You are now signed in!"),
                    tokens: Some(tokens),
                }
            }
            Err(e) => {
                tracing::error!("Sign-in failed: {}", e);
                let description = match &e {
                    ApiError::Transport(_) => GENERIC_FAILURE,
                    _ => e.server_message().unwrap_or(GENERIC_FAILURE),
                };
                LoginOutcome {
                    notification: Notification::failure("Error", description),
                    tokens: None,
                }
            }
        })
    }

    pub async fn register(&self, form: RegisterData) -> Result<Notification, ValidationFailure> {
        form.validate()?;

        Ok(match self.api.register(&form).await {
            Ok(()) => {
                tracing::info!(email = %form.email, "account registered");
                Notification::success("Success", "Your account has been created!")
            }
            Err(ApiError::Transport(e)) => {
                tracing::error!("Error registering account: {}", e);
                Notification::failure("Error", "Failed to create account. Please try again.")
            }
            Err(e) => {
                tracing::error!("Registration rejected: {}", e);
                Notification::failure(
                    "Failure registering",
                    e.server_message().unwrap_or(
                        "Your account has not been created, make sure all fields are filled out correctly.",
                    ),
                )
            }
        })
    }

    pub async fn contact(&self, form: ContactMessage) -> Result<Notification, ValidationFailure> {
        form.validate()?;

        Ok(match self.api.send_contact(&form).await {
            Ok(()) => {
                tracing::info!("contact message sent");
                Notification::success("Success", "Message sent successfully!")
            }
            Err(e) => {
                tracing::error!("Error sending contact message: {}", e);
                Notification::failure("Error", "Failed to send the message. Please try again later.")
            }
        })
    }

    /// End the server session and forget the locally selected business
    pub async fn logout<S: KeyValueStore>(&self, selection: &mut SelectionStore<S>) -> Notification {
        match self.api.logout().await {
            Ok(()) => {
                tracing::info!("logged out");
                selection.set_selected(None);
                Notification::success("You've been logged out", "Thank you for using Startup Planner.")
            }
            Err(e) => {
                tracing::error!("Error logging out: {}", e);
                e.to_notification("Logout failed.")
            }
        }
    }
}
