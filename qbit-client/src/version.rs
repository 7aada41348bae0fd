//! WebAPI protocol version value and the lazily-resolved version gate.
//!
//! Several endpoints changed name or appeared at specific WebAPI versions;
//! dispatch sites consult the gate instead of probing endpoints. The version
//! is fetched from the server once per client lifetime and cached.

use std::fmt;
use std::str::FromStr;

use crate::client::{Client, ClientError};

/// WebAPI version where the pause/resume endpoints were renamed to
/// stop/start (qBittorrent 5.0).
pub const START_STOP_RENAME: ApiVersion = ApiVersion::new(2, 11, 0);

/// WebAPI version that introduced the `torrents/setTags` bulk upsert
/// (qBittorrent 5.1).
pub const BULK_TAG_UPSERT: ApiVersion = ApiVersion::new(2, 11, 4);

/// Three-component WebAPI version as reported by `app/webapiVersion`.
///
/// Ordering is the full three-component comparison used by
/// [`Client::require_min_version`]. Endpoint-rename gates use the coarser
/// [`ApiVersion::precedes_minor`] instead; the two comparison modes are
/// deliberately distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ApiVersion {
    /// The unresolved sentinel; a cached zero version means no resolution
    /// has succeeded yet.
    pub const ZERO: ApiVersion = ApiVersion::new(0, 0, 0);

    /// Creates a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Returns true when this is the unresolved all-zero sentinel.
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Major/minor-only ordering, ignoring the patch level.
    ///
    /// Used to pick between endpoint name variants that changed at a minor
    /// release (e.g. `torrents/pause` vs `torrents/stop`). This is coarser
    /// than the `Ord` comparison and must not be substituted for it:
    /// `2.11.3.precedes_minor(2.11.4)` is false while `2.11.3 < 2.11.4`
    /// holds.
    pub fn precedes_minor(self, other: ApiVersion) -> bool {
        (self.major, self.minor) < (other.major, other.minor)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ApiVersion {
    type Err = ClientError;

    /// Parses `major[.minor[.patch]]`, tolerating a leading `v` and
    /// surrounding whitespace; missing components default to zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('v');
        if trimmed.is_empty() {
            return Err(ClientError::VersionParse {
                input: s.to_string(),
            });
        }

        let mut components = [0u64; 3];
        for (index, piece) in trimmed.split('.').enumerate() {
            if index >= components.len() {
                return Err(ClientError::VersionParse {
                    input: s.to_string(),
                });
            }
            components[index] = piece.parse().map_err(|_| ClientError::VersionParse {
                input: s.to_string(),
            })?;
        }

        Ok(ApiVersion::new(components[0], components[1], components[2]))
    }
}

impl Client {
    /// Returns the server's WebAPI version, resolving it on first use.
    ///
    /// The first successful call fetches `app/webapiVersion` and caches the
    /// parsed result for the lifetime of the client; later calls return the
    /// cached value without network access. Resolution is serialized behind
    /// a lock, so concurrent first calls collapse into a single fetch and
    /// all observe the same value. A failed resolution leaves the cache
    /// unset and the next call retries.
    ///
    /// # Errors
    ///
    /// - `ClientError::VersionFetch` - The `app/webapiVersion` request failed
    /// - `ClientError::VersionParse` - The server returned an unparsable version
    pub async fn api_version(&self) -> Result<ApiVersion, ClientError> {
        let mut cached = self.cached_version.lock().await;
        if !cached.is_zero() {
            return Ok(*cached);
        }

        let raw = self
            .web_api_version()
            .await
            .map_err(|source| ClientError::VersionFetch(Box::new(source)))?;
        let version = raw.parse::<ApiVersion>()?;
        tracing::debug!(%version, "resolved WebAPI version");

        *cached = version;
        Ok(version)
    }

    /// Fails unless the server's WebAPI version is at least `required`.
    ///
    /// Full three-component comparison; for the major/minor endpoint-rename
    /// gates see [`ApiVersion::precedes_minor`].
    ///
    /// # Errors
    ///
    /// - `ClientError::UnsupportedVersion` - Resolved version is older than `required`
    /// - Any error from [`Client::api_version`]
    pub async fn require_min_version(&self, required: ApiVersion) -> Result<(), ClientError> {
        let current = self.api_version().await?;
        if current < required {
            return Err(ClientError::UnsupportedVersion { current, required });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        let version: ApiVersion = "2.9.3".parse().unwrap();
        assert_eq!(version, ApiVersion::new(2, 9, 3));
    }

    #[test]
    fn test_parse_partial_versions() {
        assert_eq!("2.11".parse::<ApiVersion>().unwrap(), ApiVersion::new(2, 11, 0));
        assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::new(2, 0, 0));
    }

    #[test]
    fn test_parse_tolerates_prefix_and_whitespace() {
        assert_eq!(
            " v2.8.19\n".parse::<ApiVersion>().unwrap(),
            ApiVersion::new(2, 8, 19)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<ApiVersion>().is_err());
        assert!("beta".parse::<ApiVersion>().is_err());
        assert!("2.11.4.1".parse::<ApiVersion>().is_err());
        assert!("2..3".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_full_ordering_uses_all_three_components() {
        assert!(ApiVersion::new(2, 11, 3) < ApiVersion::new(2, 11, 4));
        assert!(ApiVersion::new(2, 11, 4) < ApiVersion::new(2, 12, 0));
        assert!(ApiVersion::new(2, 12, 0) < ApiVersion::new(3, 0, 0));
    }

    #[test]
    fn test_precedes_minor_ignores_patch() {
        // below the rename threshold
        assert!(ApiVersion::new(2, 10, 9).precedes_minor(START_STOP_RENAME));
        // at the threshold, regardless of patch
        assert!(!ApiVersion::new(2, 11, 0).precedes_minor(START_STOP_RENAME));
        // patch alone never flips the minor gate even though full ordering sees it
        assert!(!ApiVersion::new(2, 11, 3).precedes_minor(BULK_TAG_UPSERT));
        assert!(ApiVersion::new(2, 11, 3) < BULK_TAG_UPSERT);
    }

    #[test]
    fn test_zero_sentinel() {
        assert!(ApiVersion::ZERO.is_zero());
        assert!(!ApiVersion::new(2, 0, 0).is_zero());
    }

    #[test]
    fn test_display_round_trips() {
        let version = ApiVersion::new(2, 11, 4);
        assert_eq!(version.to_string(), "2.11.4");
        assert_eq!(version.to_string().parse::<ApiVersion>().unwrap(), version);
    }
}
