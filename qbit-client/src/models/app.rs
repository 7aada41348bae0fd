//! Application, transfer, and category payloads

use serde::Deserialize;

/// Build information from `app/buildInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    /// Qt version the server was built against
    pub qt: String,
    /// libtorrent version
    pub libtorrent: String,
    /// Boost version
    pub boost: String,
    /// OpenSSL version
    pub openssl: String,
    /// 32 or 64
    pub bitness: i64,
}

/// Global connection state from `transfer/info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ConnectionStatus {
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "firewalled")]
    Firewalled,
    /// Explicitly reported as disconnected, or any state this client does
    /// not recognize
    #[default]
    #[serde(other)]
    Disconnected,
}

/// Global transfer statistics from `transfer/info`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TransferInfo {
    /// Current download speed in bytes per second
    pub dl_info_speed: i64,
    /// Data downloaded this session in bytes
    pub dl_info_data: i64,
    /// Current upload speed in bytes per second
    pub up_info_speed: i64,
    /// Data uploaded this session in bytes
    pub up_info_data: i64,
    /// Global download rate limit, zero when unlimited
    pub dl_rate_limit: i64,
    /// Global upload rate limit, zero when unlimited
    pub up_rate_limit: i64,
    /// DHT node count
    pub dht_nodes: i64,
    /// Listen-port reachability
    pub connection_status: ConnectionStatus,
}

/// One category from `torrents/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Category {
    pub name: String,
    #[serde(rename = "savePath")]
    pub save_path: String,
}

/// Representative subset of `app/preferences`.
///
/// The server reports far more keys than listed here; unknown keys are
/// ignored and missing keys decode to zero values, so this type stays
/// compatible across server versions. Partial updates go through
/// [`crate::Client::set_preferences`] with an explicit key map instead of
/// round-tripping this struct.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppPreferences {
    pub save_path: String,
    pub temp_path: String,
    pub temp_path_enabled: bool,
    pub max_active_downloads: i64,
    pub max_active_torrents: i64,
    pub max_active_uploads: i64,
    pub queueing_enabled: bool,
    pub dht: bool,
    pub pex: bool,
    pub lsd: bool,
    pub max_connec: i64,
    pub max_connec_per_torrent: i64,
    pub listen_port: i64,
    pub random_port: bool,
    pub upnp: bool,
    pub dl_limit: i64,
    pub up_limit: i64,
    pub alt_dl_limit: i64,
    pub alt_up_limit: i64,
    pub max_ratio_enabled: bool,
    pub max_ratio: f64,
    pub max_ratio_act: i64,
    pub start_paused_enabled: bool,
    pub auto_tmm_enabled: bool,
    pub web_ui_port: i64,
}
