//! Client configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Settings for the REST history source
///
/// ```toml
/// base_url = "https://workbench.example.org/api"
/// auth_token = "0123abcd"
/// request_timeout_secs = 30
/// lookup_cache_capacity = 1000
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// API root, e.g. `https://host/api`
    pub base_url: String,
    /// Token for `Authorization: Token ...`
    pub auth_token: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Max cached reference lookups per render pass
    pub lookup_cache_capacity: u64,
}

impl HistoryConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With API root
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With auth token
    #[inline]
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// With lookup cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.lookup_cache_capacity = capacity;
        self
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns error on invalid TOML or out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for an empty or non-http base URL or
    /// a zero timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got '{base}'"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Request timeout as duration
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Join path segments onto the API root, with a trailing slash
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.trim().trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
        url.push('/');
        url
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            auth_token: None,
            request_timeout_secs: 30,
            lookup_cache_capacity: 1_000,
        }
    }
}

impl fmt::Debug for HistoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryConfig")
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("lookup_cache_capacity", &self.lookup_cache_capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = HistoryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn toml_with_partial_keys() {
        let config = HistoryConfig::from_toml_str(
            r#"
            base_url = "https://workbench.example.org/api/"
            auth_token = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://workbench.example.org/api/");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.lookup_cache_capacity, 1_000);
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            HistoryConfig::from_toml_str(r#"base_url = """#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HistoryConfig::from_toml_str(r#"base_url = "ftp://host""#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HistoryConfig::from_toml_str("request_timeout_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HistoryConfig::from_toml_str("request_timeout_secs = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn endpoint_joins_segments() {
        let config = HistoryConfig::new().with_base_url("http://host/api/");
        assert_eq!(
            config.endpoint(&["tasks", "42", "history"]),
            "http://host/api/tasks/42/history/"
        );
        assert_eq!(config.endpoint(&["metadatafields"]), "http://host/api/metadatafields/");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://127.0.0.1:9000/api\"").unwrap();
        writeln!(file, "request_timeout_secs = 5").unwrap();

        let config = HistoryConfig::load(file.path()).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn load_missing_file() {
        let result = HistoryConfig::load("/nonexistent/ewb-history.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn debug_hides_token() {
        let config = HistoryConfig::new().with_auth_token("s3cret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
        assert!(format!("{:?}", HistoryConfig::new()).contains("auth_token: None"));
    }

    #[test]
    fn builder_methods() {
        let config = HistoryConfig::new()
            .with_base_url("https://x/api")
            .with_auth_token("t")
            .with_timeout_secs(3)
            .with_cache_capacity(10);
        assert_eq!(config.auth_token.as_deref(), Some("t"));
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.lookup_cache_capacity, 10);
    }
}
