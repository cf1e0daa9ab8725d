//! Deterministic in-process tag device.
//!
//! Used by the test suite and by `veritag pair --simulate`. Emits a scripted
//! sequence of tag discoveries on each scan, then keeps the stream open
//! until the caller stops it, matching real scan-stream semantics.

use crate::device::{ScanSession, TagDevice, TagDiscovered, TagWriteRecord};
use crate::error::{PairingError, PairingResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A simulated NFC device with scripted discoveries.
pub struct SimulatedDevice {
    /// Tags emitted, in order, on every scan.
    script: Vec<TagDiscovered>,
    /// Delay between scripted discoveries.
    emit_interval: Duration,
    /// When set, every write fails with this device diagnostic.
    write_failure: Option<String>,
    /// Records successfully written, for inspection.
    writes: Arc<Mutex<Vec<TagWriteRecord>>>,
    /// Number of scan feeder tasks currently running.
    active_scans: Arc<AtomicUsize>,
}

impl SimulatedDevice {
    /// Device that discovers the given tag serials on each scan.
    pub fn with_tags(serials: &[&str]) -> Self {
        Self {
            script: serials
                .iter()
                .map(|s| TagDiscovered {
                    serial_id: s.to_string(),
                })
                .collect(),
            emit_interval: Duration::from_millis(5),
            write_failure: None,
            writes: Arc::new(Mutex::new(Vec::new())),
            active_scans: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make every write fail with the given diagnostic.
    pub fn failing_writes(mut self, diagnostic: &str) -> Self {
        self.write_failure = Some(diagnostic.to_string());
        self
    }

    /// Records written so far.
    pub fn writes(&self) -> Vec<TagWriteRecord> {
        self.writes.lock().expect("writes lock poisoned").clone()
    }

    /// Number of scan streams still running. Zero once every session has
    /// been stopped or dropped and its feeder task has wound down.
    pub fn active_scans(&self) -> usize {
        self.active_scans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagDevice for SimulatedDevice {
    fn supported(&self) -> bool {
        true
    }

    async fn scan(&self) -> PairingResult<ScanSession> {
        let (tx, rx) = mpsc::channel(8);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let script = self.script.clone();
        let interval = self.emit_interval;
        let active = Arc::clone(&self.active_scans);

        active.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async move {
            'feed: {
                for tag in script {
                    tokio::select! {
                        _ = &mut stop_rx => break 'feed,
                        _ = tokio::time::sleep(interval) => {
                            if tx.send(tag).await.is_err() {
                                break 'feed;
                            }
                        }
                    }
                }
                // Scripted tags exhausted; a real stream never terminates
                // on its own, so hold the channel open until stopped.
                let _ = stop_rx.await;
            }
            active.fetch_sub(1, Ordering::SeqCst);
        });

        Ok(ScanSession::new(rx, stop_tx))
    }

    async fn write(&self, record: &TagWriteRecord) -> PairingResult<()> {
        if let Some(diagnostic) = &self.write_failure {
            return Err(PairingError::Device(diagnostic.clone()));
        }
        self.writes
            .lock()
            .expect("writes lock poisoned")
            .push(record.clone());
        Ok(())
    }
}
