//! Async client for the qBittorrent WebUI API (v2).
//!
//! This crate provides an authenticated HTTP client with typed endpoint
//! methods, a lazily-resolved WebAPI version gate for picking between
//! endpoint variants, and a tracker-health reannounce supervisor that drives
//! a torrent's trackers toward a working state.

pub mod client;
pub mod config;
pub mod models;
pub mod reannounce;
pub mod version;

// Re-export main types for convenient access
pub use client::{Client, ClientError};
pub use config::ClientConfig;
pub use models::{
    AddTorrentOptions, AppPreferences, BuildInfo, Category, ConnectionStatus, Torrent,
    TorrentFilter, TorrentListOptions, TorrentProperties, TorrentState, TorrentTracker,
    TrackerStatus, TransferInfo,
};
pub use reannounce::{ReannounceOptions, ReannouncePhase, TrackerMaintenance, trackers_working};
pub use version::ApiVersion;
