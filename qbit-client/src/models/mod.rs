//! Request and response types for the qBittorrent WebUI API

pub mod app;
pub mod torrent;
pub mod tracker;

pub use app::{AppPreferences, BuildInfo, Category, ConnectionStatus, TransferInfo};
pub use torrent::{
    AddTorrentOptions, Torrent, TorrentFilter, TorrentListOptions, TorrentProperties, TorrentState,
};
pub use tracker::{TorrentTracker, TrackerStatus};
