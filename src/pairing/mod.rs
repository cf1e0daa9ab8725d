//! The pairing state machine.
//!
//! State is an explicit immutable record and every change flows through the
//! pure [`transition`] function, never through ad hoc field assignment. The async
//! driver that performs network and device I/O around these transitions
//! lives in [`session`].

pub mod session;

pub use session::PairingSession;

use serde::{Deserialize, Serialize};

/// State of one pairing attempt.
///
/// `Idle` is the entry state. `Success` is terminal and does not auto-reset;
/// `Error` permits a manual [`PairingInput::Reset`] back to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum PairingState {
    Idle,
    Scanning,
    Encoding,
    Success,
    /// Failed attempt; the human-readable message is retained for display.
    Error { message: String },
}

impl PairingState {
    /// Whether the attempt has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PairingState::Success | PairingState::Error { .. })
    }
}

/// Inputs that drive the machine between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingInput {
    /// Begin scanning. Valid only from `Idle`; the driver checks the
    /// certificate-URL and capability guards before feeding this input.
    StartScan,
    /// A tag came into range. Honored only in `Scanning`; everywhere else
    /// it is ignored so a second tag bump cannot re-trigger a write.
    TagDiscovered,
    /// The device write completed. Valid only from `Encoding`.
    WriteCompleted,
    /// Any error that blocks forward progress.
    Failed { message: String },
    /// Explicit user action returning `Error` to `Idle`.
    Reset,
}

/// Pure transition function: `(state, input) -> state`.
///
/// Inputs that are invalid for the current state leave it unchanged. The
/// driver is responsible for the side effects attached to transitions
/// (stopping the scan on every exit from `Scanning`/`Encoding`, marking the
/// record verified exactly once on `Encoding → Success`).
pub fn transition(state: &PairingState, input: &PairingInput) -> PairingState {
    match (state, input) {
        (PairingState::Idle, PairingInput::StartScan) => PairingState::Scanning,
        (PairingState::Scanning, PairingInput::TagDiscovered) => PairingState::Encoding,
        (PairingState::Encoding, PairingInput::WriteCompleted) => PairingState::Success,
        (s, PairingInput::Failed { message }) if !s.is_terminal() => PairingState::Error {
            message: message.clone(),
        },
        (PairingState::Error { .. }, PairingInput::Reset) => PairingState::Idle,
        // Everything else: no transition. Notably, TagDiscovered past
        // Scanning and a second StartScan mid-attempt are ignored.
        (s, _) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(msg: &str) -> PairingInput {
        PairingInput::Failed {
            message: msg.to_string(),
        }
    }

    #[test]
    fn test_happy_path() {
        let s = PairingState::Idle;
        let s = transition(&s, &PairingInput::StartScan);
        assert_eq!(s, PairingState::Scanning);
        let s = transition(&s, &PairingInput::TagDiscovered);
        assert_eq!(s, PairingState::Encoding);
        let s = transition(&s, &PairingInput::WriteCompleted);
        assert_eq!(s, PairingState::Success);
    }

    #[test]
    fn test_tag_discovered_ignored_past_scanning() {
        // Second tag bump while encoding must not change anything.
        let s = PairingState::Encoding;
        assert_eq!(transition(&s, &PairingInput::TagDiscovered), s);

        let s = PairingState::Success;
        assert_eq!(transition(&s, &PairingInput::TagDiscovered), s);

        let s = PairingState::Idle;
        assert_eq!(transition(&s, &PairingInput::TagDiscovered), s);
    }

    #[test]
    fn test_failed_from_any_non_terminal_state() {
        for s in [PairingState::Idle, PairingState::Scanning, PairingState::Encoding] {
            let next = transition(&s, &failed("device error: NDEF write rejected"));
            match next {
                PairingState::Error { message } => {
                    assert!(message.contains("NDEF write rejected"))
                }
                other => panic!("expected Error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_terminal_states_absorb_failures() {
        let s = PairingState::Success;
        assert_eq!(transition(&s, &failed("late failure")), s);

        let s = PairingState::Error {
            message: "first".to_string(),
        };
        // The original payload is retained, not overwritten.
        assert_eq!(transition(&s, &failed("second")), s);
    }

    #[test]
    fn test_reset_only_from_error() {
        let s = PairingState::Error {
            message: "x".to_string(),
        };
        assert_eq!(transition(&s, &PairingInput::Reset), PairingState::Idle);

        // Success does not auto-reset, and Reset does not apply to it.
        let s = PairingState::Success;
        assert_eq!(transition(&s, &PairingInput::Reset), s);

        let s = PairingState::Scanning;
        assert_eq!(transition(&s, &PairingInput::Reset), s);
    }

    #[test]
    fn test_start_scan_ignored_mid_attempt() {
        let s = PairingState::Scanning;
        assert_eq!(transition(&s, &PairingInput::StartScan), s);
        let s = PairingState::Encoding;
        assert_eq!(transition(&s, &PairingInput::StartScan), s);
    }
}
