//! GoPro media API client.
//!
//! Only one call is needed: `PUT /media/{id}` with `{"captured_at": "..."}`.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::api::token::AccessToken;
use crate::core::config::{api, network, Settings};
use crate::core::error::{AppError, AppResult};

/// Service that stores a media item's capture time.
///
/// Implementations must be shareable across tasks: each update runs on its own task.
#[async_trait]
pub trait MediaUpdateService: Send + Sync {
    /// Sets `captured_at` (already formatted as `YYYY-MM-DDTHH:MM:SSZ`) on one media item.
    async fn update_captured_at(&self, media_id: &str, captured_at: &str) -> AppResult<()>;
}

#[derive(Debug, Serialize)]
struct CapturedAtBody<'a> {
    captured_at: &'a str,
}

/// `MediaUpdateService` backed by the GoPro HTTP API.
#[derive(Debug)]
pub struct GoProApiClient {
    client: Client,
    base_url: Url,
    token: AccessToken,
}

impl GoProApiClient {
    pub fn new(base_url: &str, token: AccessToken, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("retime/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(network::connect_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
            token,
        })
    }

    pub fn from_settings(settings: &Settings, token: AccessToken) -> AppResult<Self> {
        Self::new(&settings.api_base_url, token, settings.request_timeout())
    }

    pub fn media_url(&self, media_id: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Validation(format!("cannot use {} as API base", self.base_url)))?
            .pop_if_empty()
            .push("media")
            .push(media_id);
        Ok(url)
    }
}

/// Parses the base URL and strips a trailing slash so path segments append cleanly.
fn normalize_base_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(AppError::Validation(format!("cannot use {} as API base", raw)));
    }
    Ok(url)
}

#[async_trait]
impl MediaUpdateService for GoProApiClient {
    async fn update_captured_at(&self, media_id: &str, captured_at: &str) -> AppResult<()> {
        let url = self.media_url(media_id)?;
        log::debug!("PUT {} captured_at={}", url, captured_at);

        let dispatch_error = |reason: String| AppError::UpdateDispatch {
            media_id: media_id.to_string(),
            reason,
        };

        let response = self
            .client
            .put(url)
            .header(AUTHORIZATION, self.token.bearer_header())
            .header(ACCEPT, api::MEDIA_ACCEPT)
            .json(&CapturedAtBody { captured_at })
            .send()
            .await
            .map_err(|e| dispatch_error(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(dispatch_error(format!("HTTP {}", status)));
        }

        // The body is not inspected beyond being JSON
        if let Err(e) = response.json::<serde_json::Value>().await {
            log::debug!("media {} updated, response body was not JSON: {}", media_id, e);
        }

        Ok(())
    }
}
