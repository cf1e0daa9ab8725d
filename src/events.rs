// Copyright 2026 Veritag Contributors
// SPDX-License-Identifier: Apache-2.0

//! Veritag event bus — typed events from every component.
//!
//! A `tokio::sync::broadcast` channel carrying [`VeritagEvent`] values.
//! Any consumer — CLI output, log files, a future UI shell — can subscribe
//! independently. When no subscribers exist, events are silently dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Every event the runtime emits. Serialized to JSON for machine consumers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VeritagEvent {
    /// A listing fetch populated the catalog.
    CatalogLoaded { count: usize, timestamp: String },
    /// A detail fetch resolved an artwork's certificate URL.
    CertificateResolved { artwork_id: String, url: String },
    /// A pairing attempt entered `Scanning`.
    ScanStarted {
        artwork_id: String,
        attempt_id: String,
    },
    /// A tag came into range during a scan.
    TagDiscovered {
        serial_id: String,
        attempt_id: String,
    },
    /// The certificate URL was written to the tag and the record verified.
    TagWritten {
        artwork_id: String,
        url: String,
        attempt_id: String,
    },
    /// A pairing attempt failed.
    PairingFailed { attempt_id: String, error: String },
    /// The machine was reset from `Error` back to `Idle`.
    PairingReset { attempt_id: String },
}

/// The central event bus.
///
/// All components emit through this bus; consumers subscribe to receive a
/// stream of all events.
pub struct EventBus {
    sender: broadcast::Sender<VeritagEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all subscribers. Silently ignores if no subscribers.
    pub fn emit(&self, event: VeritagEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<VeritagEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// ISO-8601 timestamp for the current time.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
