//! Client configuration embedded in the page.
//!
//! Pages may carry a `<script id="portal-config" type="application/json">`
//! element overriding any subset of the defaults below. Missing fields keep
//! their default, so an absent element behaves exactly like `{}`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::ClientError;

pub const CONFIG_ELEMENT_ID: &str = "portal-config";

pub const DEFAULT_TOKEN_KEY: &str = "jwt_token";
pub const DEFAULT_USER_ID_KEY: &str = "user_id";
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.8;
pub const DEFAULT_COMMENTS_ENDPOINT: &str = "/get-comments";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub storage: StorageKeys,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub comments: CommentsConfig,
    pub log_level: String,
}

/// Keys under which the credential marker is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageKeys {
    /// `localStorage` key holding the bearer token.
    pub token: String,
    /// `sessionStorage` key holding the signed-in user id.
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub logout_selector: String,
    pub login_selector: String,
    pub register_selector: String,
    /// Drop both credential keys when the logout link is clicked.
    pub clear_on_logout: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub selector: String,
    pub classes: Vec<String>,
    /// Fraction of the viewport height an element's top edge must rise above.
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommentsConfig {
    pub endpoint: String,
    pub container_selector: String,
    pub loading_selector: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            nav: NavConfig::default(),
            reveal: RevealConfig::default(),
            comments: CommentsConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { token: DEFAULT_TOKEN_KEY.to_owned(), user_id: DEFAULT_USER_ID_KEY.to_owned() }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            logout_selector: "#logout-link".to_owned(),
            login_selector: r#"a[href="/login"]"#.to_owned(),
            register_selector: r#"a[href="/register"]"#.to_owned(),
            clear_on_logout: true,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".animate-on-scroll".to_owned(),
            classes: vec!["animate__animated".to_owned(), "animate__fadeInUp".to_owned()],
            threshold: DEFAULT_REVEAL_THRESHOLD,
        }
    }
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMMENTS_ENDPOINT.to_owned(),
            container_selector: "#comments-container".to_owned(),
            loading_selector: "#comments-loading".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a config override document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for malformed JSON, unknown fields, or
    /// values outside their accepted range.
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(trimmed).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ClientError> {
        let threshold = self.reveal.threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ClientError::Config(format!("reveal.threshold must be in (0, 1], got {threshold}")));
        }
        if self.reveal.classes.is_empty() {
            return Err(ClientError::Config("reveal.classes must name at least one class".into()));
        }
        if let Some(bad) = self.reveal.classes.iter().find(|c| c.is_empty() || c.chars().any(char::is_whitespace)) {
            return Err(ClientError::Config(format!("reveal.classes entry `{bad}` is not a single class name")));
        }
        if self.storage.token.is_empty() || self.storage.user_id.is_empty() {
            return Err(ClientError::Config("storage keys must be non-empty".into()));
        }
        self.level().map(|_| ())
    }

    /// Resolve `log_level` to a `log` filter.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the name is not a `log` level.
    pub fn level(&self) -> Result<log::Level, ClientError> {
        self.log_level
            .parse::<log::Level>()
            .map_err(|_| ClientError::Config(format!("unknown log_level `{}`", self.log_level)))
    }
}

/// Read the config element from `document`, falling back to defaults.
///
/// The second element of the tuple carries the reason a present element was
/// rejected, so callers can log it once a logger exists.
#[cfg(feature = "browser")]
pub fn from_document(document: &web_sys::Document) -> (ClientConfig, Option<ClientError>) {
    let Some(raw) = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return (ClientConfig::default(), None);
    };
    match ClientConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e)),
    }
}
