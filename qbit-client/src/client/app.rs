//! Application-scope endpoints (`app/*`)

use serde_json::Value;

use super::{Client, ClientError};
use crate::models::{AppPreferences, BuildInfo};

impl Client {
    /// Returns the application version string, e.g. `v5.0.2`.
    pub async fn app_version(&self) -> Result<String, ClientError> {
        self.get_text("app/version").await
    }

    /// Returns the raw WebAPI version string, e.g. `2.11.2`.
    ///
    /// Most callers want the parsed and cached [`Client::api_version`]
    /// instead; this is the uncached fetch it builds on.
    pub async fn web_api_version(&self) -> Result<String, ClientError> {
        self.get_text("app/webapiVersion").await
    }

    /// Returns build information for the server.
    pub async fn build_info(&self) -> Result<BuildInfo, ClientError> {
        self.get_json("app/buildInfo", &[]).await
    }

    /// Shuts down the qBittorrent instance.
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        self.post_expect_ok("app/shutdown", &[]).await
    }

    /// Returns the server's application preferences.
    pub async fn preferences(&self) -> Result<AppPreferences, ClientError> {
        self.get_json("app/preferences", &[]).await
    }

    /// Updates a subset of application preferences.
    ///
    /// Only the keys present in `preferences` are changed; everything else
    /// keeps its server-side value.
    pub async fn set_preferences(
        &self,
        preferences: &serde_json::Map<String, Value>,
    ) -> Result<(), ClientError> {
        let payload =
            serde_json::to_string(preferences).map_err(|source| ClientError::Decode {
                endpoint: "app/setPreferences".to_string(),
                source,
            })?;
        self.post_expect_ok("app/setPreferences", &[("json", payload)])
            .await
    }

    /// Returns the default save path for new torrents.
    pub async fn default_save_path(&self) -> Result<String, ClientError> {
        self.get_text("app/defaultSavePath").await
    }
}
