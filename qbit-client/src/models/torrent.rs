//! Torrent listing, properties, and add/filter option types

use serde::Deserialize;

/// Torrent state as reported by `torrents/info`.
///
/// qBittorrent 5.0 renamed the paused states to stopped; both spellings are
/// kept so the client works against either server generation. States this
/// client does not recognize decode as [`TorrentState::Unknown`] rather than
/// failing the whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TorrentState {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "missingFiles")]
    MissingFiles,
    #[serde(rename = "uploading")]
    Uploading,
    #[serde(rename = "pausedUP")]
    PausedUpload,
    #[serde(rename = "stoppedUP")]
    StoppedUpload,
    #[serde(rename = "queuedUP")]
    QueuedUpload,
    #[serde(rename = "stalledUP")]
    StalledUpload,
    #[serde(rename = "checkingUP")]
    CheckingUpload,
    #[serde(rename = "forcedUP")]
    ForcedUpload,
    #[serde(rename = "allocating")]
    Allocating,
    #[serde(rename = "downloading")]
    Downloading,
    #[serde(rename = "metaDL")]
    FetchingMetadata,
    #[serde(rename = "forcedMetaDL")]
    ForcedFetchingMetadata,
    #[serde(rename = "pausedDL")]
    PausedDownload,
    #[serde(rename = "stoppedDL")]
    StoppedDownload,
    #[serde(rename = "queuedDL")]
    QueuedDownload,
    #[serde(rename = "stalledDL")]
    StalledDownload,
    #[serde(rename = "checkingDL")]
    CheckingDownload,
    #[serde(rename = "forcedDL")]
    ForcedDownload,
    #[serde(rename = "checkingResumeData")]
    CheckingResumeData,
    #[serde(rename = "moving")]
    Moving,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One row of the `torrents/info` listing.
///
/// Fields the server omits decode to their zero values, so listings from
/// older servers never fail wholesale.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Torrent {
    pub hash: String,
    pub name: String,
    pub size: i64,
    pub total_size: i64,
    /// Completion fraction in `0.0..=1.0`
    pub progress: f64,
    pub dlspeed: i64,
    pub upspeed: i64,
    pub downloaded: i64,
    pub uploaded: i64,
    /// Estimated seconds remaining, `8640000` when unknown
    pub eta: i64,
    pub num_seeds: i64,
    pub num_leechs: i64,
    pub num_complete: i64,
    pub num_incomplete: i64,
    pub ratio: f64,
    pub state: TorrentState,
    pub category: String,
    /// Comma-separated tag list
    pub tags: String,
    pub added_on: i64,
    pub completion_on: i64,
    pub save_path: String,
    /// First working tracker URL, empty when none
    pub tracker: String,
    pub dl_limit: i64,
    pub up_limit: i64,
    pub force_start: bool,
    pub auto_tmm: bool,
    /// Queue priority, `0` when queueing is disabled
    pub priority: i64,
    pub time_active: i64,
    pub last_activity: i64,
}

/// The `torrents/properties` payload for a single torrent.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TorrentProperties {
    pub save_path: String,
    pub creation_date: i64,
    pub piece_size: i64,
    pub comment: String,
    pub total_wasted: i64,
    pub total_uploaded: i64,
    pub total_downloaded: i64,
    pub up_limit: i64,
    pub dl_limit: i64,
    pub time_elapsed: i64,
    pub seeding_time: i64,
    pub nb_connections: i64,
    pub nb_connections_limit: i64,
    pub share_ratio: f64,
    pub addition_date: i64,
    pub completion_date: i64,
    pub created_by: String,
    pub dl_speed: i64,
    pub dl_speed_avg: i64,
    pub up_speed: i64,
    pub up_speed_avg: i64,
    pub eta: i64,
    pub total_size: i64,
    pub pieces_num: i64,
    pub pieces_have: i64,
    pub seeds: i64,
    pub seeds_total: i64,
    pub peers: i64,
    pub peers_total: i64,
    /// Seconds until the next scheduled announce
    pub reannounce: i64,
}

/// Server-side filter for the `torrents/info` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorrentFilter {
    All,
    Downloading,
    Seeding,
    Completed,
    Stopped,
    Active,
    Inactive,
    Resumed,
    Stalled,
    StalledUploading,
    StalledDownloading,
    Errored,
}

impl TorrentFilter {
    /// Returns the query-parameter value for this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            TorrentFilter::All => "all",
            TorrentFilter::Downloading => "downloading",
            TorrentFilter::Seeding => "seeding",
            TorrentFilter::Completed => "completed",
            TorrentFilter::Stopped => "stopped",
            TorrentFilter::Active => "active",
            TorrentFilter::Inactive => "inactive",
            TorrentFilter::Resumed => "resumed",
            TorrentFilter::Stalled => "stalled",
            TorrentFilter::StalledUploading => "stalled_uploading",
            TorrentFilter::StalledDownloading => "stalled_downloading",
            TorrentFilter::Errored => "errored",
        }
    }
}

/// Query surface of `torrents/info`.
///
/// The default requests the full unfiltered listing.
#[derive(Debug, Clone, Default)]
pub struct TorrentListOptions {
    /// Server-side state filter
    pub filter: Option<TorrentFilter>,
    /// Restrict to one category
    pub category: Option<String>,
    /// Restrict to one tag
    pub tag: Option<String>,
    /// Sort key, any `Torrent` field name
    pub sort: Option<String>,
    /// Reverse the sort order
    pub reverse: bool,
    /// Cap the number of rows returned
    pub limit: Option<u32>,
    /// Skip this many rows
    pub offset: Option<u32>,
    /// Restrict to these torrent hashes
    pub hashes: Vec<String>,
}

impl TorrentListOptions {
    /// Builds the query pairs for `torrents/info`.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = self.filter {
            pairs.push(("filter", filter.as_str().to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tag", tag.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if self.reverse {
            pairs.push(("reverse", "true".to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if !self.hashes.is_empty() {
            pairs.push(("hashes", self.hashes.join("|")));
        }
        pairs
    }
}

/// Form fields accepted by `torrents/add`.
#[derive(Debug, Clone, Default)]
pub struct AddTorrentOptions {
    /// Download directory, server default when unset
    pub save_path: Option<String>,
    /// Category to assign on add
    pub category: Option<String>,
    /// Tags to assign on add
    pub tags: Vec<String>,
    /// Add in the stopped state
    pub paused: bool,
    /// Skip hash checking
    pub skip_checking: bool,
    /// Per-torrent download limit in bytes per second
    pub download_limit: Option<i64>,
    /// Per-torrent upload limit in bytes per second
    pub upload_limit: Option<i64>,
    /// Rename the torrent on add
    pub rename: Option<String>,
}

impl AddTorrentOptions {
    /// Builds the form pairs for `torrents/add`; the URL or payload field is
    /// appended by the caller.
    pub(crate) fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(save_path) = &self.save_path {
            pairs.push(("savepath", save_path.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        if self.paused {
            // both spellings so pre- and post-5.0 servers honor it
            pairs.push(("paused", "true".to_string()));
            pairs.push(("stopped", "true".to_string()));
        }
        if self.skip_checking {
            pairs.push(("skip_checking", "true".to_string()));
        }
        if let Some(limit) = self.download_limit {
            pairs.push(("dlLimit", limit.to_string()));
        }
        if let Some(limit) = self.upload_limit {
            pairs.push(("upLimit", limit.to_string()));
        }
        if let Some(rename) = &self.rename {
            pairs.push(("rename", rename.clone()));
        }
        pairs
    }
}
