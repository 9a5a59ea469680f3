//! `LiveClient` - Bilibili live API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, REFERER};
use tracing::instrument;
use url::Url;

use super::api::LocalGuardApi;
use super::error::GuardApiError;
use super::types::{GuardListEnvelope, GuardPage};
use super::variant::GuardQuery;

/// Default base URL for the Bilibili live API.
const DEFAULT_BASE_URL: &str = "https://api.live.bilibili.com";

/// Default `Referer` header.
const DEFAULT_REFERER: &str = "https://live.bilibili.com/";

/// Bilibili live API client.
#[derive(Debug)]
pub struct LiveClient {
    /// HTTP client (default headers carry `Referer` and `Cookie`).
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
}

/// Builder for `LiveClient`.
#[derive(Debug)]
pub struct LiveClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    referer: Option<String>,
    cookie: Option<String>,
    timeout: Option<Duration>,
}

impl LiveClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            referer: None,
            cookie: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the `Referer` header (default: `https://live.bilibili.com/`).
    #[must_use]
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Sets the session cookie, e.g. `SESSDATA=...; bili_jct=...` (required).
    #[must_use]
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Sets a per-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` or `cookie` is not set.
    /// - `referer` or `cookie` is not a valid header value.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<LiveClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;
        let cookie = self.cookie.context("cookie is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).context("invalid default base URL")?
        };

        let referer = self.referer.unwrap_or_else(|| String::from(DEFAULT_REFERER));

        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer).context("invalid referer header value")?,
        );
        let mut cookie_value =
            HeaderValue::from_str(&cookie).context("invalid cookie header value")?;
        cookie_value.set_sensitive(true);
        headers.insert(COOKIE, cookie_value);

        let mut builder = Client::builder()
            .user_agent(&user_agent)
            .default_headers(headers)
            .gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(LiveClient {
            http_client,
            base_url,
        })
    }
}

impl LiveClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> LiveClientBuilder {
        LiveClientBuilder::new()
    }
}

impl LocalGuardApi for LiveClient {
    #[instrument(skip_all, fields(room_id = %query.room_id, page = page))]
    async fn fetch_page(&self, query: &GuardQuery, page: u32) -> Result<GuardPage, GuardApiError> {
        let path = query.variant.path();
        let url = self
            .base_url
            .join(path)
            .map_err(|source| GuardApiError::InvalidUrl { path, source })?;
        let params = query.variant.query_pairs(query, page);

        tracing::debug!(%url, ?params, "guard list request");

        let response = self
            .http_client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|source| GuardApiError::Request { page, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuardApiError::Transport {
                page,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| GuardApiError::Request { page, source })?;
        tracing::debug!(body_len = body.len(), "response body received");

        let envelope: GuardListEnvelope =
            serde_json::from_str(&body).map_err(|source| GuardApiError::Decode { page, source })?;
        GuardPage::from_envelope(envelope, page)
    }
}
