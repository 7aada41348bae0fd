//! Client configuration.
//!
//! All connection parameters live here so call sites never carry
//! hard-coded hosts or timeouts.

use std::time::Duration;

/// Connection settings for a qBittorrent WebUI instance.
///
/// Credentials may be left empty for instances that allow anonymous local
/// access; [`crate::Client::login`] then skips the login request entirely.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the WebUI, without the `/api/v2` suffix
    pub base_url: String,
    /// WebUI username, empty for anonymous access
    pub username: String,
    /// WebUI password, empty for anonymous access
    pub password: String,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// User agent sent with every HTTP request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            username: String::new(),
            password: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: "qbit-client/0.1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert!(config.username.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
