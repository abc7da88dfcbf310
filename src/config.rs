//! Process-wide configuration.
//!
//! [`Config`] carries the options a configurator may set. The dispatcher
//! keeps it inside an immutable snapshot that `configure` replaces as a
//! whole, so readers never observe a half-written configuration.

/// Environment variable read by [`Config::from_env`].
pub const NOTICE_ONLY_API_KEY_ENV: &str = "NOTICEGATE_NOTICE_ONLY_API_KEY";

/// Configuration for a dispatcher.
///
/// # Example
///
/// ```rust
/// use noticegate::Config;
///
/// let config = Config::new().with_notice_only_api_key("notice-key");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.notice_only_api_key(), Some("notice-key"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// API key for the dedicated notice-only sink
    pub notice_only_api_key: Option<String>,
}

impl Config {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment.
    ///
    /// Blank values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            notice_only_api_key: lookup(NOTICE_ONLY_API_KEY_ENV)
                .filter(|key| !key.trim().is_empty()),
        }
    }

    /// Set the notice-only API key.
    pub fn with_notice_only_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.notice_only_api_key = Some(api_key.into());
        self
    }

    /// The notice-only API key, if one was configured.
    pub fn notice_only_api_key(&self) -> Option<&str> {
        self.notice_only_api_key.as_deref()
    }

    /// Validates the configuration.
    ///
    /// Returns Ok(()) if valid, or an error message describing the issue.
    pub fn validate(&self) -> Result<(), String> {
        match &self.notice_only_api_key {
            Some(key) if key.trim().is_empty() => {
                Err("notice_only_api_key must not be blank".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.notice_only_api_key(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_with_key() {
        let config = Config::new().with_notice_only_api_key("abc123");
        assert_eq!(config.notice_only_api_key(), Some("abc123"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_key_is_invalid() {
        let config = Config::new().with_notice_only_api_key("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(|key| {
            (key == NOTICE_ONLY_API_KEY_ENV).then(|| "from-env".to_string())
        });
        assert_eq!(config.notice_only_api_key(), Some("from-env"));

        let blank = Config::from_lookup(|_| Some(String::new()));
        assert_eq!(blank.notice_only_api_key(), None);

        let unset = Config::from_lookup(|_| None);
        assert_eq!(unset, Config::default());
    }
}
