//! Authenticated HTTP client for the qBittorrent WebUI API.
//!
//! [`Client`] owns the HTTP transport, including the session cookie issued
//! by `auth/login`, and exposes typed endpoint methods grouped by API scope.
//! The WebAPI version gate (`version` module) and the reannounce supervisor
//! (`reannounce` module) build on this transport.

mod app;
mod categories;
mod tags;
mod torrents;
mod transfer;

use reqwest::header::SET_COOKIE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use url::Url;

use crate::config::ClientConfig;
use crate::reannounce::ReannouncePhase;
use crate::version::ApiVersion;

/// Errors that can occur while talking to a qBittorrent instance.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP transport error")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("IP is banned for too many failed login attempts")]
    Banned,

    #[error("authentication failed: {reason}")]
    AuthFailed { reason: String },

    #[error("could not decode response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not resolve WebAPI version")]
    VersionFetch(#[source] Box<ClientError>),

    #[error("could not parse WebAPI version {input:?}")]
    VersionParse { input: String },

    #[error("WebAPI version {current} is older than required {required}")]
    UnsupportedVersion {
        current: ApiVersion,
        required: ApiVersion,
    },

    #[error("{phase} failed for torrent {hash}")]
    Reannounce {
        hash: String,
        phase: ReannouncePhase,
        #[source]
        source: Box<ClientError>,
    },

    #[error("reannounce for torrent {hash} took too long")]
    ReannounceTookTooLong { hash: String },

    #[error("operation cancelled")]
    Cancelled,

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Authenticated client for one qBittorrent WebUI instance.
///
/// Cheap to share behind an `Arc`; all methods take `&self`. The only
/// interior state is the session cookie jar and the resolved WebAPI
/// version cache.
pub struct Client {
    http: reqwest::Client,
    api_base: Url,
    config: ClientConfig,
    pub(crate) cached_version: Mutex<ApiVersion>,
}

impl Client {
    /// Creates a client for the instance at `config.base_url`.
    ///
    /// The underlying HTTP client carries a cookie store for the session
    /// cookie issued by `auth/login`.
    ///
    /// # Errors
    ///
    /// - `ClientError::Config` - Base URL cannot be parsed
    /// - `ClientError::Http` - HTTP client construction failed
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let api_base = Url::parse(&format!("{}/api/v2/", config.base_url.trim_end_matches('/')))
            .map_err(|e| ClientError::Config {
                reason: format!("invalid base URL {:?}: {e}", config.base_url),
            })?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            api_base,
            config,
            cached_version: Mutex::new(ApiVersion::ZERO),
        })
    }

    /// Logs into the WebUI and stores the session cookie for later requests.
    ///
    /// Skipped entirely when both username and password are empty, matching
    /// instances that allow anonymous local access.
    ///
    /// # Errors
    ///
    /// - `ClientError::Banned` - The server banned this IP after repeated failures
    /// - `ClientError::AuthFailed` - Credentials were rejected
    /// - `ClientError::UnexpectedStatus` - Any other non-OK response
    pub async fn login(&self) -> Result<(), ClientError> {
        if self.config.username.is_empty() && self.config.password.is_empty() {
            return Ok(());
        }

        let form = [
            ("username", self.config.username.clone()),
            ("password", self.config.password.clone()),
        ];
        let response = self.post_form("auth/login", &form).await?;

        match response.status() {
            StatusCode::FORBIDDEN => return Err(ClientError::Banned),
            StatusCode::OK => {}
            status => {
                return Err(ClientError::UnexpectedStatus {
                    endpoint: "auth/login".to_string(),
                    status: status.as_u16(),
                });
            }
        }

        // the session cookie lands in the jar; the body is only a sanity check
        let has_session_cookie = response.headers().contains_key(SET_COOKIE);
        let body = response.text().await?;

        if body == "Fails." || (!has_session_cookie && body != "Ok.") {
            return Err(ClientError::AuthFailed {
                reason: "bad credentials".to_string(),
            });
        }

        tracing::debug!(host = %self.api_base, "logged in");
        Ok(())
    }

    /// Ends the current WebUI session.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.post_expect_ok("auth/logout", &[]).await
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ClientError> {
        self.api_base.join(endpoint).map_err(|e| ClientError::Config {
            reason: format!("invalid endpoint {endpoint:?}: {e}"),
        })
    }

    pub(crate) async fn get_endpoint(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, ClientError> {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        tracing::debug!(endpoint, status = %response.status(), "GET");
        Ok(response)
    }

    pub(crate) async fn post_form(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<Response, ClientError> {
        let url = self.endpoint_url(endpoint)?;
        let response = self.http.post(url).form(form).send().await?;
        tracing::debug!(endpoint, status = %response.status(), "POST");
        Ok(response)
    }

    /// POST for endpoints whose only interesting outcome is a 200.
    pub(crate) async fn post_expect_ok(
        &self,
        endpoint: &str,
        form: &[(&str, String)],
    ) -> Result<(), ClientError> {
        let response = self.post_form(endpoint, form).await?;
        Self::ensure_ok(endpoint, &response)
    }

    pub(crate) fn ensure_ok(endpoint: &str, response: &Response) -> Result<(), ClientError> {
        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, ClientError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self.get_endpoint(endpoint, query).await?;
        Self::ensure_ok(endpoint, &response)?;
        Self::read_json(endpoint, response).await
    }

    pub(crate) async fn get_text(&self, endpoint: &str) -> Result<String, ClientError> {
        let response = self.get_endpoint(endpoint, &[]).await?;
        Self::ensure_ok(endpoint, &response)?;
        Ok(response.text().await?)
    }

    /// The WebUI joins multi-hash parameters with `|`.
    pub(crate) fn join_hashes(hashes: &[String]) -> String {
        hashes.join("|")
    }
}
