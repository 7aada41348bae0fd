//! Tag endpoints (`torrents/*Tags`)

use super::{Client, ClientError};
use crate::version;

impl Client {
    /// Returns all tags known to the server.
    pub async fn tags(&self) -> Result<Vec<String>, ClientError> {
        self.get_json("torrents/tags", &[]).await
    }

    /// Creates tags without attaching them to any torrent.
    pub async fn create_tags(&self, tags: &[String]) -> Result<(), ClientError> {
        self.post_expect_ok("torrents/createTags", &[("tags", tags.join(","))])
            .await
    }

    /// Adds tags to torrents, keeping whatever tags they already have.
    pub async fn add_tags(&self, hashes: &[String], tags: &[String]) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("tags", tags.join(",")),
        ];
        self.post_expect_ok("torrents/addTags", &form).await
    }

    /// Replaces the tag set of torrents in a single call.
    ///
    /// Requires WebAPI 2.11.4 (qBittorrent 5.1); on older servers this fails
    /// with [`ClientError::UnsupportedVersion`] without issuing the request,
    /// and the caller falls back to [`Client::remove_tags`] plus
    /// [`Client::add_tags`].
    pub async fn set_tags(&self, hashes: &[String], tags: &[String]) -> Result<(), ClientError> {
        self.require_min_version(version::BULK_TAG_UPSERT).await?;

        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("tags", tags.join(",")),
        ];
        self.post_expect_ok("torrents/setTags", &form).await
    }

    /// Removes tags from torrents; the tags themselves continue to exist.
    pub async fn remove_tags(&self, hashes: &[String], tags: &[String]) -> Result<(), ClientError> {
        let form = [
            ("hashes", Self::join_hashes(hashes)),
            ("tags", tags.join(",")),
        ];
        self.post_expect_ok("torrents/removeTags", &form).await
    }

    /// Deletes tags from the server entirely.
    pub async fn delete_tags(&self, tags: &[String]) -> Result<(), ClientError> {
        self.post_expect_ok("torrents/deleteTags", &[("tags", tags.join(","))])
            .await
    }
}
