//! Async driver for one pairing attempt.
//!
//! Owns the transient per-attempt state (certificate link, scan handle) and
//! sequences: detail fetch → certificate extraction → scan → write → store
//! update. All state changes go through the pure [`transition`] function;
//! this module adds the I/O and the side effects the transitions name.

use crate::acquisition::CatalogFetcher;
use crate::catalog::{CatalogStore, CertificateLink};
use crate::config::Config;
use crate::device::{TagDevice, TagWriteRecord};
use crate::error::{PairingError, PairingResult};
use crate::events::{now_timestamp, EventBus, VeritagEvent};
use crate::extraction;
use crate::pairing::{transition, PairingInput, PairingState};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

/// One pairing session: a catalog plus at most one in-flight attempt.
///
/// There is a single logical thread of control: every operation runs to
/// completion before the next is accepted, so the store has at most one
/// writer and no lock ordering to reason about.
pub struct PairingSession {
    config: Config,
    fetcher: CatalogFetcher,
    device: Arc<dyn TagDevice>,
    store: Arc<Mutex<CatalogStore>>,
    bus: Arc<EventBus>,
    state: PairingState,
    /// Resolved certificate for the selected artwork. Transient: owned by
    /// this attempt, discarded when a new artwork is selected.
    certificate: Option<CertificateLink>,
    attempt_id: Uuid,
}

impl PairingSession {
    /// Create a session over the given device and store.
    pub fn new(
        config: Config,
        device: Arc<dyn TagDevice>,
        store: Arc<Mutex<CatalogStore>>,
        bus: Arc<EventBus>,
    ) -> Self {
        let fetcher = CatalogFetcher::new(&config);
        Self {
            config,
            fetcher,
            device,
            store,
            bus,
            state: PairingState::Idle,
            certificate: None,
            attempt_id: Uuid::new_v4(),
        }
    }

    /// Current machine state.
    pub fn state(&self) -> &PairingState {
        &self.state
    }

    /// The certificate resolved for the current selection, if any.
    pub fn certificate(&self) -> Option<&CertificateLink> {
        self.certificate.as_ref()
    }

    /// Fetch the listing and rebuild the catalog from it.
    ///
    /// Returns the number of extracted records. A listing failure does not
    /// touch the pairing state; no attempt is in flight yet.
    pub async fn load_catalog(&self) -> PairingResult<usize> {
        let html = self.fetcher.fetch_listing().await?;
        let artworks = extraction::extract_listing(&html);
        let count = artworks.len();
        self.store
            .lock()
            .expect("store lock poisoned")
            .replace_all(artworks);
        info!(count, "catalog loaded");
        self.bus.emit(VeritagEvent::CatalogLoaded {
            count,
            timestamp: now_timestamp(),
        });
        Ok(count)
    }

    /// Select one artwork: fetch its detail page and resolve the
    /// certificate URL.
    ///
    /// Selecting while a prior attempt is in flight first resets that
    /// attempt. A fetch or extraction failure moves the machine to `Error`.
    pub async fn select(&mut self, artwork_id: &str) -> PairingResult<()> {
        // New selection, new attempt. Any prior certificate is discarded.
        self.state = PairingState::Idle;
        self.certificate = None;
        self.attempt_id = Uuid::new_v4();

        if self
            .store
            .lock()
            .expect("store lock poisoned")
            .get(artwork_id)
            .is_none()
        {
            return Err(PairingError::Capability(format!(
                "unknown artwork id: {artwork_id}"
            )));
        }

        let html = match self.fetcher.fetch_detail(artwork_id).await {
            Ok(html) => html,
            Err(e) => return Err(self.fail(e)),
        };
        let url = match extraction::extract_certificate_url(&html, &self.config.certificate_prefix)
        {
            Ok(url) => url,
            Err(e) => return Err(self.fail(e)),
        };

        info!(artwork_id, url = %url, "certificate resolved");
        self.bus.emit(VeritagEvent::CertificateResolved {
            artwork_id: artwork_id.to_string(),
            url: url.clone(),
        });
        self.certificate = Some(CertificateLink {
            artwork_id: artwork_id.to_string(),
            url,
        });
        Ok(())
    }

    /// Run the pairing attempt for the selected artwork.
    ///
    /// `Idle → Scanning` on the first discovered tag `→ Encoding`, then a
    /// successful write drives `→ Success` and marks the store record
    /// verified exactly once. Every exit path from `Scanning`/`Encoding`
    /// stops the scan stream.
    pub async fn pair(&mut self) -> PairingResult<()> {
        // Guards: both reject the attempt outright; the machine stays Idle.
        let link = match (&self.state, &self.certificate) {
            (PairingState::Idle, Some(link)) => link.clone(),
            (PairingState::Idle, None) => {
                return Err(PairingError::Capability(
                    "no certificate URL resolved for the selection".to_string(),
                ))
            }
            (state, _) => {
                return Err(PairingError::Capability(format!(
                    "pairing attempt already {state:?}"
                )))
            }
        };
        if !self.device.supported() {
            return Err(PairingError::Capability(
                "NFC unsupported on this device".to_string(),
            ));
        }

        let mut scan = match self.device.scan().await {
            Ok(scan) => scan,
            Err(e) => return Err(self.fail(e)),
        };

        self.apply(PairingInput::StartScan);
        self.bus.emit(VeritagEvent::ScanStarted {
            artwork_id: link.artwork_id.clone(),
            attempt_id: self.attempt_id.to_string(),
        });

        let tag = match scan.next_tag().await {
            Some(tag) => tag,
            None => {
                scan.stop();
                return Err(self.fail(PairingError::Device(
                    "scan stream ended unexpectedly".to_string(),
                )));
            }
        };

        // First discovery wins: leave Scanning and stop the stream before
        // the write so a second tag bump cannot re-trigger anything.
        self.apply(PairingInput::TagDiscovered);
        scan.stop();
        self.bus.emit(VeritagEvent::TagDiscovered {
            serial_id: tag.serial_id.clone(),
            attempt_id: self.attempt_id.to_string(),
        });

        let record = TagWriteRecord::url(link.url.clone());
        let written = tokio::time::timeout(self.config.write_timeout(), async {
            self.device.write(&record).await
        })
        .await;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.fail(e)),
            Err(_) => {
                return Err(self.fail(PairingError::Device("tag write timed out".to_string())))
            }
        }

        self.apply(PairingInput::WriteCompleted);
        // The exactly-once store update tied to Encoding → Success.
        self.store
            .lock()
            .expect("store lock poisoned")
            .mark_verified(&link.artwork_id);
        info!(
            artwork_id = %link.artwork_id,
            serial_id = %tag.serial_id,
            "tag written, record verified"
        );
        self.bus.emit(VeritagEvent::TagWritten {
            artwork_id: link.artwork_id.clone(),
            url: link.url,
            attempt_id: self.attempt_id.to_string(),
        });
        Ok(())
    }

    /// Explicit user action: return from `Error` to `Idle`, clearing the
    /// retained payload. The resolved certificate survives so the attempt
    /// can be retried without another detail fetch.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, PairingState::Error { .. }) {
            self.apply(PairingInput::Reset);
            self.bus.emit(VeritagEvent::PairingReset {
                attempt_id: self.attempt_id.to_string(),
            });
        }
    }

    /// Feed one input through the pure transition function.
    fn apply(&mut self, input: PairingInput) {
        let next = transition(&self.state, &input);
        info!(from = ?self.state, to = ?next, ?input, "transition");
        self.state = next;
    }

    /// Record a blocking failure: transition to `Error` and hand the error
    /// back to the caller.
    fn fail(&mut self, err: PairingError) -> PairingError {
        warn!(attempt = %self.attempt_id, %err, "pairing attempt failed");
        self.apply(PairingInput::Failed {
            message: err.to_string(),
        });
        self.bus.emit(VeritagEvent::PairingFailed {
            attempt_id: self.attempt_id.to_string(),
            error: err.to_string(),
        });
        err
    }
}
