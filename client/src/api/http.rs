//! HTTP implementation of the planner API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, multipart, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    AccountData, AvatarUpload, BillingData, Business, Competitor, ContactMessage, LoginData,
    NewBusiness, Paginated, RegisterData, SecurityData,
};

use super::{BusinessApi, CompetitorApi, ProfileApi, SessionApi, SessionTokens};
use crate::config::{ApiConfig, SessionConfig};
use crate::error::{ApiError, ApiResult};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Planner API client
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    session_id: Option<String>,
    csrf_token: Option<String>,
}

impl HttpApi {
    /// Create a client from configuration
    pub fn new(api: &ApiConfig, session: &SessionConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            session_id: session.session_id.clone(),
            csrf_token: session.csrf_token.clone(),
        })
    }

    /// Create an anonymous client against `base_url` (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: None,
            csrf_token: None,
        }
    }

    /// Attach session cookies
    pub fn with_session(mut self, session_id: Option<String>, csrf_token: Option<String>) -> Self {
        self.session_id = session_id;
        self.csrf_token = csrf_token;
        self
    }

    fn cookie_header(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(id) = &self.session_id {
            parts.push(format!("sessionid={}", id));
        }
        if let Some(token) = &self.csrf_token {
            parts.push(format!("csrftoken={}", token));
        }
        (!parts.is_empty()).then(|| parts.join("; "))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");

        let mutating = method != Method::GET;
        let mut builder = self.client.request(method, url);
        if let Some(cookie) = self.cookie_header() {
            builder = builder.header(header::COOKIE, cookie);
        }
        if mutating {
            if let Some(token) = &self.csrf_token {
                builder = builder.header(CSRF_HEADER, token);
            }
        }
        builder
    }

    /// Send and decode a JSON body, mapping non-2xx responses to [`ApiError`]
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("API request failed: {}", e);
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::error!("API error: {}", err);
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send, ignoring whatever success marker the API returns
    async fn send_unit(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.send::<Value>(builder).await.map(|_| ())
    }
}

#[async_trait]
impl BusinessApi for HttpApi {
    async fn list_businesses(&self) -> ApiResult<Vec<Business>> {
        self.send(self.request(Method::GET, "/api/businesses")).await
    }

    async fn create_business(&self, business: &NewBusiness) -> ApiResult<Business> {
        self.send(self.request(Method::POST, "/api/businesses").json(business))
            .await
    }

    async fn update_business(&self, business: &Business) -> ApiResult<Business> {
        let path = format!("/api/businesses/{}", business.id);
        self.send(self.request(Method::PUT, &path).json(business)).await
    }

    async fn delete_business(&self, id: i64) -> ApiResult<()> {
        let path = format!("/api/businesses/{}", id);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }
}

#[async_trait]
impl CompetitorApi for HttpApi {
    async fn list_competitors(
        &self,
        business_id: i64,
        page: u32,
    ) -> ApiResult<Paginated<Competitor>> {
        let builder = self
            .request(Method::GET, "/api/competitors")
            .query(&[("page", page.to_string()), ("businessId", business_id.to_string())]);
        self.send(builder).await
    }

    async fn generate_competitors(&self, business: &Business) -> ApiResult<Vec<Competitor>> {
        self.send(self.request(Method::POST, "/api/competitors").json(business))
            .await
    }

    async fn delete_competitor(&self, id: i64) -> ApiResult<()> {
        let path = format!("/api/competitors/{}", id);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }

    async fn delete_competitors_for(&self, business_id: i64) -> ApiResult<()> {
        let builder = self
            .request(Method::DELETE, "/api/competitors")
            .query(&[("businessId", business_id.to_string())]);
        self.send_unit(builder).await
    }
}

#[async_trait]
impl ProfileApi for HttpApi {
    async fn update_account(
        &self,
        account: &AccountData,
        avatar: Option<&AvatarUpload>,
    ) -> ApiResult<AccountData> {
        let mut form = multipart::Form::new()
            .text("display_name", account.display_name.clone())
            .text("email", account.email.clone())
            .text("bio", account.bio.clone());

        if let Some(upload) = avatar {
            let part = multipart::Part::bytes(upload.bytes.clone())
                .file_name(upload.file_name.clone())
                .mime_str(&upload.content_type)?;
            form = form.part("avatar", part);
        }

        self.send(self.request(Method::PUT, "/api/account").multipart(form))
            .await
    }

    async fn update_billing(&self, billing: &BillingData) -> ApiResult<()> {
        self.send_unit(self.request(Method::PUT, "/api/billing").json(billing))
            .await
    }

    async fn update_security(&self, security: &SecurityData) -> ApiResult<()> {
        self.send_unit(self.request(Method::PUT, "/api/security").json(security))
            .await
    }
}

#[async_trait]
impl SessionApi for HttpApi {
    async fn login(&self, form: &LoginData) -> ApiResult<SessionTokens> {
        let response = self
            .request(Method::POST, "/api/auth/login")
            .json(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("API request failed: {}", e);
                ApiError::Transport(e)
            })?;

        let tokens = SessionTokens::from_set_cookie(
            response
                .headers()
                .get_all(header::SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok()),
        );
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::error!("API error: {}", err);
            return Err(err);
        }
        Ok(tokens)
    }

    async fn register(&self, form: &RegisterData) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, "/api/auth/register").json(form))
            .await
    }

    async fn send_contact(&self, form: &ContactMessage) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, "/api/contact-us").json(form))
            .await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, "/api/logout")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header() {
        let api = HttpApi::with_base_url("http://localhost:3000/");
        assert_eq!(api.cookie_header(), None);
        assert_eq!(api.base_url, "http://localhost:3000");

        let api = api.with_session(Some("abc".to_string()), Some("xyz".to_string()));
        assert_eq!(
            api.cookie_header().as_deref(),
            Some("sessionid=abc; csrftoken=xyz")
        );
    }
}
