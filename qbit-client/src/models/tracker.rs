//! Tracker records as reported by `torrents/trackers`

use serde::Deserialize;

/// Tracker state as reported by the server.
///
/// The WebUI API encodes tracker status as a small integer; the mapping is
/// stable across server versions:
///
/// | Code | Meaning |
/// |------|---------|
/// | 0 | disabled (used for DHT, PeX, and LSD pseudo-entries) |
/// | 1 | not yet contacted |
/// | 2 | contacted and working |
/// | 3 | updating |
/// | 4 | contacted but not working |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum TrackerStatus {
    /// Tracker entry is disabled (DHT, PeX, LSD)
    Disabled,
    /// Tracker has not been contacted yet
    NotContacted,
    /// Tracker has been contacted and is working
    Working,
    /// Tracker is updating
    Updating,
    /// Tracker has been contacted but is not working or sends bad replies
    NotWorking,
}

impl From<i64> for TrackerStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => TrackerStatus::Disabled,
            2 => TrackerStatus::Working,
            3 => TrackerStatus::Updating,
            4 => TrackerStatus::NotWorking,
            // 1, and anything a future server version may add
            _ => TrackerStatus::NotContacted,
        }
    }
}

/// One tracker entry for a torrent, an immutable snapshot per poll.
///
/// The server reports trackers in tier order and prepends pseudo-entries for
/// DHT, PeX, and LSD with [`TrackerStatus::Disabled`]; health classification
/// depends on preserving that order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TorrentTracker {
    /// Tracker announce URL
    pub url: String,
    /// Current tracker status
    pub status: TrackerStatus,
    /// Tracker tier, lower tiers are tried first
    pub tier: i64,
    /// Peers reported by this tracker
    pub num_peers: i64,
    /// Seeds reported by this tracker
    pub num_seeds: i64,
    /// Leeches reported by this tracker
    pub num_leeches: i64,
    /// Completed downloads reported by this tracker
    pub num_downloaded: i64,
    /// Last message from this tracker, empty when none
    #[serde(rename = "msg")]
    pub message: String,
}

impl Default for TorrentTracker {
    fn default() -> Self {
        Self {
            url: String::new(),
            status: TrackerStatus::NotContacted,
            tier: 0,
            num_peers: 0,
            num_seeds: 0,
            num_leeches: 0,
            num_downloaded: 0,
            message: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_map_to_variants() {
        assert_eq!(TrackerStatus::from(0), TrackerStatus::Disabled);
        assert_eq!(TrackerStatus::from(1), TrackerStatus::NotContacted);
        assert_eq!(TrackerStatus::from(2), TrackerStatus::Working);
        assert_eq!(TrackerStatus::from(3), TrackerStatus::Updating);
        assert_eq!(TrackerStatus::from(4), TrackerStatus::NotWorking);
    }

    #[test]
    fn test_unknown_status_code_maps_to_not_contacted() {
        assert_eq!(TrackerStatus::from(7), TrackerStatus::NotContacted);
        assert_eq!(TrackerStatus::from(-1), TrackerStatus::NotContacted);
    }

    #[test]
    fn test_deserialize_tracker_entry() {
        let json = r#"{
            "url": "http://tracker.example.com/announce",
            "status": 2,
            "tier": 0,
            "num_peers": 12,
            "num_seeds": 5,
            "num_leeches": 7,
            "num_downloaded": 300,
            "msg": ""
        }"#;

        let tracker: TorrentTracker = serde_json::from_str(json).unwrap();
        assert_eq!(tracker.status, TrackerStatus::Working);
        assert_eq!(tracker.num_peers, 12);
        assert!(tracker.message.is_empty());
    }

    #[test]
    fn test_deserialize_dht_pseudo_entry() {
        let json = r#"{"url": "** [DHT] **", "status": 0, "tier": -1, "msg": ""}"#;

        let tracker: TorrentTracker = serde_json::from_str(json).unwrap();
        assert_eq!(tracker.status, TrackerStatus::Disabled);
        assert_eq!(tracker.tier, -1);
    }
}
