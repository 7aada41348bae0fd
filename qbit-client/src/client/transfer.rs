//! Transfer-scope endpoints (`transfer/*`)

use super::{Client, ClientError};
use crate::models::TransferInfo;

impl Client {
    /// Returns global transfer statistics.
    pub async fn transfer_info(&self) -> Result<TransferInfo, ClientError> {
        self.get_json("transfer/info", &[]).await
    }

    /// Returns the global download limit in bytes per second, zero when
    /// unlimited.
    pub async fn global_download_limit(&self) -> Result<i64, ClientError> {
        self.get_json("transfer/downloadLimit", &[]).await
    }

    /// Sets the global download limit in bytes per second, zero for
    /// unlimited.
    pub async fn set_global_download_limit(&self, limit: i64) -> Result<(), ClientError> {
        self.post_expect_ok("transfer/setDownloadLimit", &[("limit", limit.to_string())])
            .await
    }

    /// Returns the global upload limit in bytes per second, zero when
    /// unlimited.
    pub async fn global_upload_limit(&self) -> Result<i64, ClientError> {
        self.get_json("transfer/uploadLimit", &[]).await
    }

    /// Sets the global upload limit in bytes per second, zero for unlimited.
    pub async fn set_global_upload_limit(&self, limit: i64) -> Result<(), ClientError> {
        self.post_expect_ok("transfer/setUploadLimit", &[("limit", limit.to_string())])
            .await
    }

    /// Toggles alternative speed limits on or off.
    pub async fn toggle_alternative_speed_limits(&self) -> Result<(), ClientError> {
        self.post_expect_ok("transfer/toggleSpeedLimitsMode", &[]).await
    }

    /// Returns true when alternative speed limits are active.
    pub async fn alternative_speed_limits_enabled(&self) -> Result<bool, ClientError> {
        let mode: i64 = self.get_json("transfer/speedLimitsMode", &[]).await?;
        Ok(mode == 1)
    }
}
