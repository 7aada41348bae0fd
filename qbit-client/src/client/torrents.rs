//! Torrent-scope endpoints (`torrents/*`)

use reqwest::StatusCode;

use super::{Client, ClientError};
use crate::models::{
    AddTorrentOptions, Torrent, TorrentListOptions, TorrentProperties, TorrentTracker,
};
use crate::version;

impl Client {
    /// Returns the torrent listing, optionally filtered server-side.
    pub async fn torrents(&self, options: &TorrentListOptions) -> Result<Vec<Torrent>, ClientError> {
        self.get_json("torrents/info", &options.query_pairs()).await
    }

    /// Returns detailed properties for one torrent.
    pub async fn torrent_properties(&self, hash: &str) -> Result<TorrentProperties, ClientError> {
        self.get_json("torrents/properties", &[("hash", hash.to_string())])
            .await
    }

    /// Returns the tracker list for one torrent, in server order.
    ///
    /// A 404 (unknown hash) or 403 translates to an empty list rather than
    /// an error; an empty list is also what the server reports while a
    /// magnet's metadata has not finished downloading. The reannounce
    /// supervisor depends on this contract.
    pub async fn torrent_trackers(&self, hash: &str) -> Result<Vec<TorrentTracker>, ClientError> {
        let response = self
            .get_endpoint("torrents/trackers", &[("hash", hash.to_string())])
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                tracing::debug!(hash, status = %response.status(), "trackers unavailable, treating as empty");
                Ok(Vec::new())
            }
            StatusCode::OK => Self::read_json("torrents/trackers", response).await,
            status => Err(ClientError::UnexpectedStatus {
                endpoint: "torrents/trackers".to_string(),
                status: status.as_u16(),
            }),
        }
    }

    /// Adds a torrent from a magnet link or HTTP(S) URL.
    pub async fn add_torrent_url(
        &self,
        url: &str,
        options: &AddTorrentOptions,
    ) -> Result<(), ClientError> {
        if url.is_empty() {
            return Err(ClientError::Config {
                reason: "no torrent URL provided".to_string(),
            });
        }

        let mut form = options.form_pairs();
        form.push(("urls", url.to_string()));
        self.post_expect_ok("torrents/add", &form).await
    }

    /// Deletes torrents, optionally purging their downloaded files.
    pub async fn delete_torrents(
        &self,
        hashes: &[String],
        delete_files: bool,
    ) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("deleteFiles", delete_files.to_string()),
        ];
        self.post_expect_ok("torrents/delete", &form).await
    }

    /// Asks the server to re-contact trackers for these torrents outside the
    /// normal announce schedule.
    pub async fn reannounce_torrents(&self, hashes: &[String]) -> Result<(), ClientError> {
        self.post_expect_ok("torrents/reannounce", &[("hashes", Self::join_hashes(hashes))])
            .await
    }

    /// Stops (pauses) torrents.
    ///
    /// WebAPI 2.11 renamed the endpoint from `torrents/pause` to
    /// `torrents/stop`; the resolved server version picks the name.
    pub async fn stop_torrents(&self, hashes: &[String]) -> Result<(), ClientError> {
        let endpoint = if self
            .api_version()
            .await?
            .precedes_minor(version::START_STOP_RENAME)
        {
            "torrents/pause"
        } else {
            "torrents/stop"
        };
        self.post_expect_ok(endpoint, &[("hashes", Self::join_hashes(hashes))])
            .await
    }

    /// Starts (resumes) torrents.
    ///
    /// WebAPI 2.11 renamed the endpoint from `torrents/resume` to
    /// `torrents/start`; the resolved server version picks the name.
    pub async fn start_torrents(&self, hashes: &[String]) -> Result<(), ClientError> {
        let endpoint = if self
            .api_version()
            .await?
            .precedes_minor(version::START_STOP_RENAME)
        {
            "torrents/resume"
        } else {
            "torrents/start"
        };
        self.post_expect_ok(endpoint, &[("hashes", Self::join_hashes(hashes))])
            .await
    }

    /// Rechecks torrent data against its pieces.
    pub async fn recheck_torrents(&self, hashes: &[String]) -> Result<(), ClientError> {
        self.post_expect_ok("torrents/recheck", &[("hashes", Self::join_hashes(hashes))])
            .await
    }

    /// Sets force-start, bypassing the queue.
    pub async fn set_force_start(&self, hashes: &[String], value: bool) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("value", value.to_string()),
        ];
        self.post_expect_ok("torrents/setForceStart", &form).await
    }

    /// Enables or disables automatic torrent management.
    pub async fn set_auto_management(
        &self,
        hashes: &[String],
        enable: bool,
    ) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("enable", enable.to_string()),
        ];
        self.post_expect_ok("torrents/setAutoManagement", &form).await
    }

    /// Moves torrents to a new save location.
    pub async fn set_location(&self, hashes: &[String], location: &str) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("location", location.to_string()),
        ];
        self.post_expect_ok("torrents/setLocation", &form).await
    }

    /// Sets a per-torrent download limit in bytes per second, zero for
    /// unlimited.
    pub async fn set_torrent_download_limit(
        &self,
        hashes: &[String],
        limit: i64,
    ) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("limit", limit.to_string()),
        ];
        self.post_expect_ok("torrents/setDownloadLimit", &form).await
    }

    /// Sets a per-torrent upload limit in bytes per second, zero for
    /// unlimited.
    pub async fn set_torrent_upload_limit(
        &self,
        hashes: &[String],
        limit: i64,
    ) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("limit", limit.to_string()),
        ];
        self.post_expect_ok("torrents/setUploadLimit", &form).await
    }

    /// Sets share limits; `-2` keeps the global limit, `-1` means no limit.
    pub async fn set_share_limits(
        &self,
        hashes: &[String],
        ratio_limit: f64,
        seeding_time_limit: i64,
        inactive_seeding_time_limit: i64,
    ) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("ratioLimit", ratio_limit.to_string()),
            ("seedingTimeLimit", seeding_time_limit.to_string()),
            ("inactiveSeedingTimeLimit", inactive_seeding_time_limit.to_string()),
        ];
        self.post_expect_ok("torrents/setShareLimits", &form).await
    }
}
