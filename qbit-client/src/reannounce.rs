//! Tracker-health reannounce supervision.
//!
//! Newly added torrents often sit on trackers that have not been contacted
//! yet or answer with transient errors. The supervisor polls tracker health
//! on an interval and asks the server to re-announce until a tracker is
//! confirmed working, the attempt budget runs out, or the caller cancels.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::{Client, ClientError};
use crate::models::{TorrentTracker, TrackerStatus};

/// Default delay between health probes.
pub const DEFAULT_REANNOUNCE_INTERVAL: Duration = Duration::from_secs(7);

/// Default number of probe cycles before giving up.
pub const DEFAULT_REANNOUNCE_MAX_ATTEMPTS: u32 = 50;

/// Tracker messages that mark a torrent as unregistered with its tracker.
/// Matched as literal case-insensitive substrings; the server does not
/// expose structured error codes for these.
const UNREGISTERED_MESSAGES: [&str; 4] =
    ["unregistered", "not registered", "not found", "not exist"];

/// Options for one supervision run; immutable once the run starts.
#[derive(Debug, Clone)]
pub struct ReannounceOptions {
    /// Delay before each health probe
    pub interval: Duration,
    /// Probe cycles before the run gives up
    pub max_attempts: u32,
    /// Delete the torrent when the attempt budget runs out
    pub delete_on_failure: bool,
}

impl Default for ReannounceOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REANNOUNCE_INTERVAL,
            max_attempts: DEFAULT_REANNOUNCE_MAX_ATTEMPTS,
            delete_on_failure: false,
        }
    }
}

/// Phase of the supervision loop in which a transport call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReannouncePhase {
    /// Fetching the torrent's tracker list
    FetchTrackers,
    /// Triggering the reannounce
    Trigger,
    /// Deleting the torrent after exhausting all attempts
    Delete,
}

impl fmt::Display for ReannouncePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReannouncePhase::FetchTrackers => write!(f, "fetching trackers"),
            ReannouncePhase::Trigger => write!(f, "triggering reannounce"),
            ReannouncePhase::Delete => write!(f, "deleting torrent"),
        }
    }
}

/// Transport operations the supervisor drives.
///
/// Enables both the real [`Client`] and scripted implementations for
/// testing the loop without a server.
#[async_trait]
pub trait TrackerMaintenance: Send + Sync {
    /// Returns the current tracker snapshot for a torrent, in server order.
    /// Empty while the torrent's metadata has not finished downloading.
    async fn current_trackers(&self, hash: &str) -> Result<Vec<TorrentTracker>, ClientError>;

    /// Asks the server to re-contact trackers for these torrents.
    async fn request_reannounce(&self, hashes: &[String]) -> Result<(), ClientError>;

    /// Removes torrents, optionally purging their files.
    async fn remove_torrents(
        &self,
        hashes: &[String],
        delete_files: bool,
    ) -> Result<(), ClientError>;
}

#[async_trait]
impl TrackerMaintenance for Client {
    async fn current_trackers(&self, hash: &str) -> Result<Vec<TorrentTracker>, ClientError> {
        self.torrent_trackers(hash).await
    }

    async fn request_reannounce(&self, hashes: &[String]) -> Result<(), ClientError> {
        self.reannounce_torrents(hashes).await
    }

    async fn remove_torrents(
        &self,
        hashes: &[String],
        delete_files: bool,
    ) -> Result<(), ClientError> {
        self.delete_torrents(hashes, delete_files).await
    }
}

/// Returns true when at least one active tracker is confirmed working.
///
/// Trackers are scanned in the order the server reports them, with two
/// early exits per entry: an unregistered-style message fails the whole
/// torrent immediately, even when a healthy tracker follows later in the
/// list, and a [`TrackerStatus::Working`] entry passes it immediately.
/// Disabled entries (DHT, PeX, LSD) are skipped. A scan that exhausts the
/// list without either exit is not working.
pub fn trackers_working(trackers: &[TorrentTracker]) -> bool {
    for tracker in trackers {
        if tracker.status == TrackerStatus::Disabled {
            continue;
        }

        // an unregistered message can accompany an otherwise OK status;
        // check it before the status
        if is_unregistered(&tracker.message) {
            return false;
        }

        if tracker.status == TrackerStatus::Working {
            return true;
        }
    }

    false
}

fn is_unregistered(message: &str) -> bool {
    let message = message.to_lowercase();
    UNREGISTERED_MESSAGES
        .iter()
        .any(|phrase| message.contains(phrase))
}

impl Client {
    /// Supervises tracker health for one torrent, re-announcing until a
    /// tracker works.
    ///
    /// Each cycle waits `options.interval`, fetches the tracker snapshot,
    /// and classifies it with [`trackers_working`]. An empty snapshot
    /// (metadata still downloading) consumes an attempt without triggering
    /// a reannounce; an unhealthy one triggers a reannounce. Transport
    /// failures abort immediately, wrapped with the failing phase; they are
    /// never retried here.
    ///
    /// Exhausting every attempt while `delete_on_failure` is false returns
    /// `Ok(())` even though no tracker was ever confirmed working; callers
    /// that opt out of deletion treat "still not working" as non-fatal.
    /// With `delete_on_failure` set, the torrent is deleted (files kept)
    /// and the run fails with [`ClientError::ReannounceTookTooLong`].
    ///
    /// The cancellation token is honored during the interval wait and
    /// before each network call, failing the run with
    /// [`ClientError::Cancelled`].
    ///
    /// # Errors
    ///
    /// - `ClientError::Reannounce` - A transport call failed mid-run
    /// - `ClientError::ReannounceTookTooLong` - Attempts exhausted with `delete_on_failure`
    /// - `ClientError::Cancelled` - The token fired mid-run
    pub async fn reannounce_with_retry(
        &self,
        hash: &str,
        options: &ReannounceOptions,
        cancel: Option<CancellationToken>,
    ) -> Result<(), ClientError> {
        let hash = hash.to_lowercase();
        supervise(self, &hash, options, cancel.as_ref()).await
    }
}

/// One bounded supervision run over any [`TrackerMaintenance`] transport.
async fn supervise<T: TrackerMaintenance>(
    transport: &T,
    hash: &str,
    options: &ReannounceOptions,
    cancel: Option<&CancellationToken>,
) -> Result<(), ClientError> {
    let mut attempts = 0;

    while attempts < options.max_attempts {
        tracing::debug!(hash, attempts, "re-announce attempt");

        wait_interval(options.interval, cancel).await?;
        check_cancelled(cancel)?;

        let trackers = transport
            .current_trackers(hash)
            .await
            .map_err(|source| reannounce_error(hash, ReannouncePhase::FetchTrackers, source))?;

        if trackers.is_empty() {
            // metadata not downloaded yet, nothing to announce to
            attempts += 1;
            continue;
        }

        if trackers_working(&trackers) {
            tracing::debug!(hash, attempts, "re-announce OK");
            return Ok(());
        }

        tracing::debug!(hash, attempts, "trackers not working yet, re-announcing");
        check_cancelled(cancel)?;
        transport
            .request_reannounce(&[hash.to_string()])
            .await
            .map_err(|source| reannounce_error(hash, ReannouncePhase::Trigger, source))?;

        attempts += 1;
    }

    if options.delete_on_failure {
        tracing::warn!(hash, "re-announce took too long, deleting torrent");
        check_cancelled(cancel)?;
        transport
            .remove_torrents(&[hash.to_string()], false)
            .await
            .map_err(|source| reannounce_error(hash, ReannouncePhase::Delete, source))?;
        return Err(ClientError::ReannounceTookTooLong {
            hash: hash.to_string(),
        });
    }

    Ok(())
}

fn reannounce_error(hash: &str, phase: ReannouncePhase, source: ClientError) -> ClientError {
    ClientError::Reannounce {
        hash: hash.to_string(),
        phase,
        source: Box::new(source),
    }
}

async fn wait_interval(
    interval: Duration,
    cancel: Option<&CancellationToken>,
) -> Result<(), ClientError> {
    match cancel {
        Some(token) => {
            tokio::select! {
                _ = tokio::time::sleep(interval) => Ok(()),
                _ = token.cancelled() => Err(ClientError::Cancelled),
            }
        }
        None => {
            tokio::time::sleep(interval).await;
            Ok(())
        }
    }
}

fn check_cancelled(cancel: Option<&CancellationToken>) -> Result<(), ClientError> {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use proptest::prelude::*;

    use super::*;

    fn tracker(status: TrackerStatus, message: &str) -> TorrentTracker {
        TorrentTracker {
            url: "http://tracker.example.com/announce".to_string(),
            status,
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_working_tracker_is_healthy() {
        assert!(trackers_working(&[tracker(TrackerStatus::Working, "")]));
    }

    #[test]
    fn test_unregistered_message_is_unhealthy() {
        assert!(!trackers_working(&[tracker(
            TrackerStatus::NotWorking,
            "torrent not registered"
        )]));
    }

    #[test]
    fn test_unregistered_message_wins_over_ok_status() {
        // the message check runs before the status check on purpose
        assert!(!trackers_working(&[tracker(
            TrackerStatus::Working,
            "Unregistered torrent"
        )]));
    }

    #[test]
    fn test_scan_continues_past_plain_failures() {
        let trackers = [
            tracker(TrackerStatus::NotWorking, "bad"),
            tracker(TrackerStatus::Working, ""),
        ];
        assert!(trackers_working(&trackers));
    }

    #[test]
    fn test_unregistered_short_circuits_before_healthy_tracker() {
        // order matters: the verdict is false even though a later tracker works
        let trackers = [
            tracker(TrackerStatus::NotWorking, "not found"),
            tracker(TrackerStatus::Working, ""),
        ];
        assert!(!trackers_working(&trackers));
    }

    #[test]
    fn test_disabled_entries_are_skipped() {
        let trackers = [
            tracker(TrackerStatus::Disabled, ""),
            tracker(TrackerStatus::Disabled, ""),
            tracker(TrackerStatus::Working, ""),
        ];
        assert!(trackers_working(&trackers));
    }

    #[test]
    fn test_exhausted_scan_is_unhealthy() {
        let trackers = [
            tracker(TrackerStatus::NotContacted, ""),
            tracker(TrackerStatus::Updating, ""),
            tracker(TrackerStatus::NotWorking, "connection refused"),
        ];
        assert!(!trackers_working(&trackers));
    }

    #[test]
    fn test_empty_list_is_unhealthy() {
        assert!(!trackers_working(&[]));
    }

    #[test]
    fn test_unregistered_matching_is_case_insensitive() {
        assert!(is_unregistered("Torrent Not Registered"));
        assert!(is_unregistered("UNREGISTERED"));
        assert!(is_unregistered("torrent does not exist"));
        assert!(!is_unregistered("stale announce"));
        assert!(!is_unregistered(""));
    }

    proptest! {
        #[test]
        fn test_all_disabled_is_never_healthy(messages in prop::collection::vec(".*", 0..8)) {
            let trackers: Vec<TorrentTracker> = messages
                .iter()
                .map(|message| tracker(TrackerStatus::Disabled, message))
                .collect();
            prop_assert!(!trackers_working(&trackers));
        }
    }

    /// Scripted transport: pops one tracker snapshot per probe and falls
    /// back to a permanently unhealthy snapshot once the script runs out.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Vec<TorrentTracker>>>,
        fetch_calls: AtomicU32,
        reannounce_calls: AtomicU32,
        delete_calls: Mutex<Vec<bool>>,
        fail_fetch: bool,
        fail_reannounce: bool,
        fail_delete: bool,
    }

    impl ScriptedTransport {
        fn scripted(responses: Vec<Vec<TorrentTracker>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Default::default()
            }
        }
    }

    fn transport_error() -> ClientError {
        ClientError::UnexpectedStatus {
            endpoint: "test".to_string(),
            status: 500,
        }
    }

    #[async_trait]
    impl TrackerMaintenance for ScriptedTransport {
        async fn current_trackers(
            &self,
            _hash: &str,
        ) -> Result<Vec<TorrentTracker>, ClientError> {
            if self.fail_fetch {
                return Err(transport_error());
            }
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| vec![tracker(TrackerStatus::NotWorking, "")]))
        }

        async fn request_reannounce(&self, _hashes: &[String]) -> Result<(), ClientError> {
            if self.fail_reannounce {
                return Err(transport_error());
            }
            self.reannounce_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn remove_torrents(
            &self,
            _hashes: &[String],
            delete_files: bool,
        ) -> Result<(), ClientError> {
            if self.fail_delete {
                return Err(transport_error());
            }
            self.delete_calls.lock().unwrap().push(delete_files);
            Ok(())
        }
    }

    fn short_options(max_attempts: u32, delete_on_failure: bool) -> ReannounceOptions {
        ReannounceOptions {
            max_attempts,
            delete_on_failure,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = ReannounceOptions::default();
        assert_eq!(options.interval, Duration::from_secs(7));
        assert_eq!(options.max_attempts, 50);
        assert!(!options.delete_on_failure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_once_a_tracker_works() {
        let transport =
            ScriptedTransport::scripted(vec![vec![tracker(TrackerStatus::Working, "")]]);

        let result = supervise(&transport, "abc", &short_options(5, false), None).await;

        assert!(result.is_ok());
        assert_eq!(transport.fetch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(transport.reannounce_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_without_delete_returns_ok() {
        let transport = ScriptedTransport::default();

        let result = supervise(&transport, "abc", &short_options(3, false), None).await;

        // exhausting the budget without delete_on_failure is not an error
        assert!(result.is_ok());
        assert_eq!(transport.fetch_calls.load(Ordering::SeqCst), 3);
        assert_eq!(transport.reannounce_calls.load(Ordering::SeqCst), 3);
        assert!(transport.delete_calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_with_delete_fails_and_keeps_files() {
        let transport = ScriptedTransport::default();

        let result = supervise(&transport, "abc", &short_options(3, true), None).await;

        assert!(matches!(
            result,
            Err(ClientError::ReannounceTookTooLong { hash }) if hash == "abc"
        ));
        assert_eq!(transport.reannounce_calls.load(Ordering::SeqCst), 3);
        assert_eq!(*transport.delete_calls.lock().unwrap(), vec![false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_snapshot_consumes_attempt_without_trigger() {
        let transport = ScriptedTransport::scripted(vec![
            Vec::new(),
            vec![tracker(TrackerStatus::Working, "")],
        ]);

        let result = supervise(&transport, "abc", &short_options(5, false), None).await;

        assert!(result.is_ok());
        assert_eq!(transport.fetch_calls.load(Ordering::SeqCst), 2);
        assert_eq!(transport.reannounce_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unhealthy_snapshot_triggers_reannounce_then_recovers() {
        let transport = ScriptedTransport::scripted(vec![
            vec![
                tracker(TrackerStatus::NotWorking, "not found"),
                tracker(TrackerStatus::Working, ""),
            ],
            vec![tracker(TrackerStatus::Working, "")],
        ]);

        let result = supervise(&transport, "abc", &short_options(5, false), None).await;

        assert!(result.is_ok());
        assert_eq!(transport.fetch_calls.load(Ordering::SeqCst), 2);
        assert_eq!(transport.reannounce_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_during_wait_stops_before_any_network_call() {
        let transport = ScriptedTransport::default();
        let token = CancellationToken::new();
        token.cancel();

        let result =
            supervise(&transport, "abc", &short_options(5, false), Some(&token)).await;

        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(transport.fetch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(transport.reannounce_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_aborts_with_phase() {
        let transport = ScriptedTransport {
            fail_fetch: true,
            ..Default::default()
        };

        let result = supervise(&transport, "abc", &short_options(5, false), None).await;

        assert!(matches!(
            result,
            Err(ClientError::Reannounce {
                phase: ReannouncePhase::FetchTrackers,
                hash,
                ..
            }) if hash == "abc"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_failure_aborts_without_further_attempts() {
        let transport = ScriptedTransport {
            fail_reannounce: true,
            ..Default::default()
        };

        let result = supervise(&transport, "abc", &short_options(5, false), None).await;

        assert!(matches!(
            result,
            Err(ClientError::Reannounce {
                phase: ReannouncePhase::Trigger,
                ..
            })
        ));
        assert_eq!(transport.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_failure_aborts_with_phase() {
        let transport = ScriptedTransport {
            fail_delete: true,
            ..Default::default()
        };

        let result = supervise(&transport, "abc", &short_options(1, true), None).await;

        assert!(matches!(
            result,
            Err(ClientError::Reannounce {
                phase: ReannouncePhase::Delete,
                ..
            })
        ));
    }
}
