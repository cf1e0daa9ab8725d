//! Error taxonomy for catalog acquisition, extraction, and pairing.
//!
//! Every failure a pairing attempt can hit maps to one of four kinds.
//! None of them are fatal to the process; the state machine surfaces the
//! message and the user retries from `Idle`.

/// Errors that can occur while building the catalog or pairing a tag.
#[derive(thiserror::Error, Debug)]
pub enum PairingError {
    /// Transport or status failure fetching the listing or a detail page.
    /// Carries the resource that was being fetched for diagnostics.
    #[error("network error fetching {resource}: {reason}")]
    Network { resource: String, reason: String },

    /// A required structural element was absent in detail markup.
    /// Listing markup tolerates partial field loss instead of failing.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// The platform lacks tag capability, or a scan precondition is unmet.
    #[error("capability error: {0}")]
    Capability(String),

    /// Scan or write failure at the platform layer. The underlying device
    /// diagnostic is preserved in the message.
    #[error("device error: {0}")]
    Device(String),
}

impl PairingError {
    /// Build a `Network` error from a reqwest failure.
    pub fn network(resource: impl Into<String>, err: &reqwest::Error) -> Self {
        PairingError::Network {
            resource: resource.into(),
            reason: err.to_string(),
        }
    }

    /// Build a `Network` error from a non-success HTTP status.
    pub fn status(resource: impl Into<String>, status: u16) -> Self {
        PairingError::Network {
            resource: resource.into(),
            reason: format!("HTTP {status}"),
        }
    }
}

/// Convenience result type.
pub type PairingResult<T> = Result<T, PairingError>;
