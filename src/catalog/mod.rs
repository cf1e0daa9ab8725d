//! Catalog data types and the in-memory store.
//!
//! Artwork records are created in bulk by one listing extraction and
//! replaced wholesale on the next listing fetch; there is no incremental
//! merge and no persistence across sessions.

pub mod store;

pub use store::CatalogStore;

use serde::{Deserialize, Serialize};

/// Verification status of one artwork. Transitions only
/// `Unverified → Verified`, exactly once, never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtworkStatus {
    Unverified,
    Verified,
}

/// One normalized catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    /// Deterministic id derived from title and year (see [`derive_id`]).
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: String,
    pub image_url: String,
    pub status: ArtworkStatus,
}

/// The canonical certificate link for one artwork, extracted from its
/// detail page. Transient, scoped to a single pairing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateLink {
    pub artwork_id: String,
    pub url: String,
}

/// Derive the catalog id for a `(title, year)` pair.
///
/// `"{title} {year}"` lowercased, with every run of non-alphanumeric
/// characters collapsed to a single `-` separator (so `"Study No. 4"` and
/// `"2019"` become `"study-no-4-2019"`). Deterministic: the same pair always
/// yields the same id. Two pairs that normalize identically collide; within
/// one listing snapshot the later entry in document order wins. That matches
/// the upstream service's observable identifiers and is kept as documented
/// policy rather than disambiguated.
pub fn derive_id(title: &str, year: &str) -> String {
    let joined = format!("{title} {year}").to_lowercase();
    joined
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
