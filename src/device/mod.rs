//! Device abstraction for NFC tag scanning and writing.
//!
//! Defines the [`TagDevice`] trait that abstracts over the platform's tag
//! primitives, plus the explicit capability-absent implementation
//! ([`UnsupportedDevice`]) returned up front when the host exposes no NFC
//! stack. The simulated implementation lives in [`simulated`].

pub mod simulated;

use crate::error::{PairingError, PairingResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

/// Payload handed to the device for one write attempt: a single URL record.
/// Immutable, constructed fresh per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagWriteRecord {
    /// Record type discriminator. Always `"url"`, the only format this
    /// system writes.
    pub record_type: String,
    /// The certificate URL being written.
    pub data: String,
}

impl TagWriteRecord {
    /// Build a URL record.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            record_type: "url".to_string(),
            data: url.into(),
        }
    }
}

/// One physical tag coming into range during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDiscovered {
    /// Device-reported serial of the discovered tag.
    pub serial_id: String,
}

/// A platform device that can scan for and write to NFC tags.
#[async_trait]
pub trait TagDevice: Send + Sync {
    /// Whether the host platform exposes tag scanning/writing at all.
    /// When `false`, every operation fails with a capability error before
    /// attempting any I/O.
    fn supported(&self) -> bool;

    /// Start scanning. Discovered tags arrive on the returned session's
    /// stream, which never terminates on its own; the caller must stop it.
    async fn scan(&self) -> PairingResult<ScanSession>;

    /// Write the record to the most recently discovered tag.
    async fn write(&self, record: &TagWriteRecord) -> PairingResult<()>;
}

/// Handle on an active scan stream.
///
/// The stream is unbounded and restartable: it yields one event per tag
/// coming into range and only ends when [`stop`](ScanSession::stop) is
/// called (idempotent) or the session is dropped. Callers must hold this
/// handle and release it deterministically on every exit path from a
/// pairing attempt: a scan left running would let stale discoveries
/// trigger a write against the wrong selection.
#[derive(Debug)]
pub struct ScanSession {
    events: mpsc::Receiver<TagDiscovered>,
    stop: Option<oneshot::Sender<()>>,
}

impl ScanSession {
    /// Wrap an event channel and its stop signal.
    pub fn new(events: mpsc::Receiver<TagDiscovered>, stop: oneshot::Sender<()>) -> Self {
        Self {
            events,
            stop: Some(stop),
        }
    }

    /// Wait for the next discovered tag. `None` once the session has been
    /// stopped and the channel drained.
    pub async fn next_tag(&mut self) -> Option<TagDiscovered> {
        self.events.recv().await
    }

    /// Stop the scan. Idempotent; later calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.events.close();
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.stop();
    }
}

impl futures::Stream for ScanSession {
    type Item = TagDiscovered;

    fn poll_next(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<TagDiscovered>> {
        self.get_mut().events.poll_recv(cx)
    }
}

/// The capability-absent device.
///
/// Returned by [`detect`] when the host has no NFC stack. Every operation
/// fails immediately with [`PairingError::Capability`], no I/O attempted,
/// so the precondition surfaces at the start of an attempt instead of as a
/// runtime probe scattered through call sites.
pub struct UnsupportedDevice;

#[async_trait]
impl TagDevice for UnsupportedDevice {
    fn supported(&self) -> bool {
        false
    }

    async fn scan(&self) -> PairingResult<ScanSession> {
        Err(PairingError::Capability(
            "NFC unsupported on this device".to_string(),
        ))
    }

    async fn write(&self, _record: &TagWriteRecord) -> PairingResult<()> {
        Err(PairingError::Capability(
            "NFC unsupported on this device".to_string(),
        ))
    }
}

/// Probe the host platform for an NFC stack.
///
/// No desktop NFC backend is wired in yet, so this returns
/// [`UnsupportedDevice`]; `pair --simulate` and the test suite use
/// [`simulated::SimulatedDevice`] instead.
pub fn detect() -> Box<dyn TagDevice> {
    Box::new(UnsupportedDevice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_write_record_is_url_type() {
        let record = TagWriteRecord::url("https://verisart.com/works/abc123");
        assert_eq!(record.record_type, "url");
        assert_eq!(record.data, "https://verisart.com/works/abc123");
    }

    #[tokio::test]
    async fn test_unsupported_device_rejects_everything() {
        let device = UnsupportedDevice;
        assert!(!device.supported());
        assert!(matches!(
            device.scan().await.unwrap_err(),
            PairingError::Capability(_)
        ));
        let record = TagWriteRecord::url("https://verisart.com/works/x");
        assert!(matches!(
            device.write(&record).await.unwrap_err(),
            PairingError::Capability(_)
        ));
    }

    #[tokio::test]
    async fn test_scan_session_is_a_stream() {
        use tokio_stream::StreamExt;

        let (tx, rx) = mpsc::channel(4);
        let (stop_tx, _stop_rx) = oneshot::channel();
        let mut session = ScanSession::new(rx, stop_tx);

        tx.send(TagDiscovered {
            serial_id: "04:b7".to_string(),
        })
        .await
        .unwrap();
        assert_eq!(session.next().await.unwrap().serial_id, "04:b7");
    }

    #[tokio::test]
    async fn test_scan_session_pending_with_no_tags_in_range() {
        use futures::StreamExt;

        let (_tx, rx) = mpsc::channel::<TagDiscovered>(4);
        let (stop_tx, _stop_rx) = oneshot::channel();
        let mut session = ScanSession::new(rx, stop_tx);

        // No tag in range: the stream waits instead of ending.
        let mut next = tokio_test::task::spawn(session.next());
        assert!(next.poll().is_pending());
    }

    #[tokio::test]
    async fn test_scan_session_stop_is_idempotent() {
        let (tx, rx) = mpsc::channel(4);
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let mut session = ScanSession::new(rx, stop_tx);

        tx.send(TagDiscovered {
            serial_id: "04:a3".to_string(),
        })
        .await
        .unwrap();
        assert_eq!(session.next_tag().await.unwrap().serial_id, "04:a3");

        session.stop();
        session.stop();
        assert!(stop_rx.try_recv().is_ok());
        assert!(session.next_tag().await.is_none());
    }
}
