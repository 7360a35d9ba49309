//! Blocking MediaWiki client for Fandom-style wikis

use super::parse::{api_error, category_page, html_to_text, parsed_html, story_section_index, thumbnail_source};
use crate::graph::CharacterId;
use crate::source::CharacterSource;
use serde_json::Value;
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on category pages followed, guarding against a
/// continuation token that never ends
const MAX_CATEGORY_PAGES: usize = 200;

/// Errors from a single API round trip.
///
/// These never leave the client: the `CharacterSource` methods log them
/// and return an empty result.
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status: {0}")]
    Status(reqwest::StatusCode),

    #[error("API error: {0}")]
    Api(String),
}

/// Result type for wiki requests
pub type WikiResult<T> = Result<T, WikiError>;

/// Connection settings for a wiki
#[derive(Debug, Clone, PartialEq)]
pub struct WikiConfig {
    /// Full URL of `api.php`
    pub api_url: String,
    /// Category whose members are the characters
    pub category: String,
    /// Requested thumbnail width in pixels
    pub thumbnail_size: u32,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl WikiConfig {
    /// Settings for `https://{domain}.fandom.com/api.php`
    pub fn for_domain(domain: &str) -> Self {
        Self {
            api_url: format!("https://{}.fandom.com/api.php", domain),
            ..Self::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            category: "Category:Characters".to_string(),
            thumbnail_size: 100,
            timeout: Duration::from_secs(30),
            user_agent: format!("charnet/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A [`CharacterSource`] backed by a live MediaWiki API.
pub struct WikiClient {
    config: WikiConfig,
    http: reqwest::blocking::Client,
}

impl WikiClient {
    /// Create a client. Fails only if the HTTP client cannot be constructed.
    pub fn new(config: WikiConfig) -> WikiResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    fn request(&self, params: &[(&str, &str)]) -> WikiResult<Value> {
        let response = self
            .http
            .get(&self.config.api_url)
            .query(params)
            .send()?;

        if !response.status().is_success() {
            return Err(WikiError::Status(response.status()));
        }

        let body: Value = response.json()?;
        match api_error(&body) {
            Some(message) => Err(WikiError::Api(message)),
            None => Ok(body),
        }
    }

    /// All members of the configured category, following continuation.
    ///
    /// On failure, returns whatever was gathered before the failing page.
    pub fn category_members(&self) -> WikiResult<BTreeSet<CharacterId>> {
        let mut members = BTreeSet::new();
        let mut continuation: Vec<(String, String)> = Vec::new();

        for page in 0..MAX_CATEGORY_PAGES {
            let mut params: Vec<(&str, &str)> = vec![
                ("action", "query"),
                ("format", "json"),
                ("list", "categorymembers"),
                ("cmtitle", self.config.category.as_str()),
                ("cmlimit", "500"),
            ];
            params.extend(continuation.iter().map(|(k, v)| (k.as_str(), v.as_str())));

            let response = match self.request(&params) {
                Ok(r) => r,
                Err(e) if page == 0 => return Err(e),
                Err(e) => {
                    tracing::warn!(page, error = %e, "category listing interrupted, keeping partial result");
                    return Ok(members);
                }
            };

            let parsed = category_page(&response);
            members.extend(parsed.members);
            match parsed.continuation {
                Some(next) => continuation = next,
                None => return Ok(members),
            }
        }

        tracing::warn!(pages = MAX_CATEGORY_PAGES, "category listing truncated");
        Ok(members)
    }

    /// Plain text of the character's story section, or of the lead section.
    pub fn biography(&self, character: &CharacterId) -> WikiResult<String> {
        let title = character.as_str();
        let sections = self.request(&[
            ("action", "parse"),
            ("page", title),
            ("format", "json"),
            ("prop", "sections"),
        ])?;

        if let Some(index) = story_section_index(&sections) {
            match self.section_text(title, &index) {
                Ok(Some(text)) => return Ok(text),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(character = %character, section = %index, error = %e, "story section unavailable, using lead")
                }
            }
        }

        Ok(self.section_text(title, "0")?.unwrap_or_default())
    }

    fn section_text(&self, title: &str, section: &str) -> WikiResult<Option<String>> {
        let response = self.request(&[
            ("action", "parse"),
            ("page", title),
            ("format", "json"),
            ("prop", "text"),
            ("section", section),
        ])?;
        Ok(parsed_html(&response).map(html_to_text))
    }

    /// Thumbnail URL for the character's page, if it has one.
    pub fn image_url(&self, character: &CharacterId) -> WikiResult<Option<String>> {
        let size = self.config.thumbnail_size.to_string();
        let response = self.request(&[
            ("action", "query"),
            ("format", "json"),
            ("titles", character.as_str()),
            ("prop", "pageimages"),
            ("pithumbsize", size.as_str()),
        ])?;
        Ok(thumbnail_source(&response))
    }
}

impl CharacterSource for WikiClient {
    fn enumerate_characters(&self) -> BTreeSet<CharacterId> {
        self.category_members().unwrap_or_else(|e| {
            tracing::warn!(category = %self.config.category, error = %e, "cannot list characters");
            BTreeSet::new()
        })
    }

    fn fetch_biography(&self, character: &CharacterId) -> String {
        self.biography(character).unwrap_or_else(|e| {
            tracing::warn!(character = %character, error = %e, "cannot fetch biography");
            String::new()
        })
    }

    fn fetch_image_url(&self, character: &CharacterId) -> String {
        match self.image_url(character) {
            Ok(url) => url.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(character = %character, error = %e, "cannot fetch image");
                String::new()
            }
        }
    }
}
