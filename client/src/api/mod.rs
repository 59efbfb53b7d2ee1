//! Planner API boundary
//!
//! The orchestrators talk to the API through these traits so they can run
//! against the HTTP client in production and in-memory fakes in tests.

mod http;

use async_trait::async_trait;
use shared::{
    AccountData, AvatarUpload, BillingData, Business, Competitor, ContactMessage, LoginData,
    NewBusiness, Paginated, RegisterData, SecurityData,
};

use crate::error::ApiResult;

pub use http::HttpApi;

/// `/api/businesses`
#[async_trait]
pub trait BusinessApi: Send + Sync {
    async fn list_businesses(&self) -> ApiResult<Vec<Business>>;
    async fn create_business(&self, business: &NewBusiness) -> ApiResult<Business>;
    async fn update_business(&self, business: &Business) -> ApiResult<Business>;
    async fn delete_business(&self, id: i64) -> ApiResult<()>;
}

/// `/api/competitors`
#[async_trait]
pub trait CompetitorApi: Send + Sync {
    async fn list_competitors(&self, business_id: i64, page: u32)
        -> ApiResult<Paginated<Competitor>>;
    /// Run a research pass for `business`; returns the newly stored competitors
    async fn generate_competitors(&self, business: &Business) -> ApiResult<Vec<Competitor>>;
    async fn delete_competitor(&self, id: i64) -> ApiResult<()>;
    async fn delete_competitors_for(&self, business_id: i64) -> ApiResult<()>;
}

/// `/api/account`, `/api/billing`, `/api/security`
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn update_account(
        &self,
        account: &AccountData,
        avatar: Option<&AvatarUpload>,
    ) -> ApiResult<AccountData>;
    async fn update_billing(&self, billing: &BillingData) -> ApiResult<()>;
    async fn update_security(&self, security: &SecurityData) -> ApiResult<()>;
}

/// Cookies handed out by a successful sign-in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub session_id: Option<String>,
    pub csrf_token: Option<String>,
}

impl SessionTokens {
    /// Pick `sessionid` and `csrftoken` out of `Set-Cookie` header values
    pub fn from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tokens = Self::default();
        for raw in headers {
            let Some((name, value)) = raw.split(';').next().and_then(|pair| pair.split_once('='))
            else {
                continue;
            };
            let value = value.trim().to_string();
            match name.trim() {
                "sessionid" if !value.is_empty() => tokens.session_id = Some(value),
                "csrftoken" if !value.is_empty() => tokens.csrf_token = Some(value),
                _ => {}
            }
        }
        tokens
    }
}

/// Sign-in, registration, contact and logout
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn login(&self, form: &LoginData) -> ApiResult<SessionTokens>;
    async fn register(&self, form: &RegisterData) -> ApiResult<()>;
    async fn send_contact(&self, form: &ContactMessage) -> ApiResult<()>;
    async fn logout(&self) -> ApiResult<()>;
}
