//! Bearer token for the media API.
//!
//! The media library page embeds the signed-in user's token in its inline state
//! (`"gpAccessToken":"…"`). It can also be supplied directly.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use select::document::Document;
use select::predicate::Name;

use crate::core::config::api;
use crate::core::error::{AppError, AppResult};

static PAGE_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r#""{}":"(.*?)""#, api::PAGE_TOKEN_KEY)).unwrap());

/// Non-empty bearer token. `Debug` never prints the value.
#[derive(Debug)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wraps a raw token; blank input is `MissingToken`.
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::MissingToken);
        }
        Ok(Self(SecretString::from(trimmed.to_string())))
    }

    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

/// Finds the token in the inline `<script>` blocks of a media library page.
///
/// When several scripts carry one, the last one wins.
pub fn extract_access_token(html: &str) -> AppResult<AccessToken> {
    let document = Document::from(html);

    let found = document
        .find(Name("script"))
        .filter_map(|script| {
            let body = script.text();
            PAGE_TOKEN_REGEX
                .captures_iter(&body)
                .last()
                .map(|caps| caps[1].to_string())
        })
        .last();

    match found {
        Some(raw) => AccessToken::new(raw),
        None => Err(AppError::MissingToken),
    }
}

/// Picks the first available token: explicit value, then page scrape.
pub fn resolve_access_token(explicit: Option<&str>, page_html: Option<&str>) -> AppResult<AccessToken> {
    if let Some(raw) = explicit.filter(|raw| !raw.trim().is_empty()) {
        return AccessToken::new(raw);
    }
    match page_html {
        Some(html) => extract_access_token(html),
        None => Err(AppError::MissingToken),
    }
}
