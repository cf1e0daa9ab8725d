//! In-memory catalog store — the single mutation point for artwork state.

use crate::catalog::{Artwork, ArtworkStatus};

/// Ordered, in-memory mapping from artwork id to record.
///
/// Records keep the document order of the listing they were extracted from.
/// After `replace_all`, the only permitted mutation is `mark_verified`.
#[derive(Debug, Default)]
pub struct CatalogStore {
    records: Vec<Artwork>,
}

impl CatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Replace the whole catalog with a fresh listing snapshot.
    ///
    /// Wholesale replacement, no merge with the previous snapshot. When two
    /// records share an id (normalization collision), the later one in the
    /// sequence wins: the earlier is dropped and the survivor keeps its own
    /// later position, matching a plain last-write-wins map rebuild.
    pub fn replace_all(&mut self, records: Vec<Artwork>) {
        let mut deduped: Vec<Artwork> = Vec::with_capacity(records.len());
        for record in records {
            deduped.retain(|r| r.id != record.id);
            deduped.push(record);
        }
        self.records = deduped;
    }

    /// Look up one record by id.
    pub fn get(&self, id: &str) -> Option<&Artwork> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records in listing order.
    pub fn all(&self) -> &[Artwork] {
        &self.records
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mark one record `Verified`. The only mutation after population.
    ///
    /// Touches exactly one record's `status` field; every other field and
    /// the order of all other records are untouched. Returns `false` when
    /// the id is unknown. Marking an already-verified record is a no-op
    /// that still returns `true`; the transition is never reversed.
    pub fn mark_verified(&mut self, id: &str) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = ArtworkStatus::Verified;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::derive_id;

    fn artwork(title: &str, year: &str) -> Artwork {
        Artwork {
            id: derive_id(title, year),
            title: title.to_string(),
            artist: "A. Vega".to_string(),
            year: year.to_string(),
            image_url: String::new(),
            status: ArtworkStatus::Unverified,
        }
    }

    #[test]
    fn test_replace_all_and_get() {
        let mut store = CatalogStore::new();
        store.replace_all(vec![artwork("Study No. 4", "2019"), artwork("Dusk", "2021")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("study-no-4-2019").unwrap().title, "Study No. 4");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_replace_all_is_wholesale() {
        let mut store = CatalogStore::new();
        store.replace_all(vec![artwork("Dusk", "2021")]);
        store.mark_verified("dusk-2021");
        // A new snapshot drops all previous state, including verification.
        store.replace_all(vec![artwork("Dusk", "2021")]);
        assert_eq!(
            store.get("dusk-2021").unwrap().status,
            ArtworkStatus::Unverified
        );
    }

    #[test]
    fn test_collision_last_write_wins() {
        let mut store = CatalogStore::new();
        let mut first = artwork("Blue  Poles", "1952");
        first.artist = "First".to_string();
        let mut second = artwork("Blue Poles", "1952");
        second.artist = "Second".to_string();
        assert_eq!(first.id, second.id);

        store.replace_all(vec![first, second]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("blue-poles-1952").unwrap().artist, "Second");
    }

    #[test]
    fn test_mark_verified_touches_one_record() {
        let mut store = CatalogStore::new();
        store.replace_all(vec![artwork("Study No. 4", "2019"), artwork("Dusk", "2021")]);

        assert!(store.mark_verified("study-no-4-2019"));
        assert_eq!(
            store.get("study-no-4-2019").unwrap().status,
            ArtworkStatus::Verified
        );
        // Other records and ordering untouched.
        assert_eq!(
            store.get("dusk-2021").unwrap().status,
            ArtworkStatus::Unverified
        );
        assert_eq!(store.all()[0].id, "study-no-4-2019");
        assert_eq!(store.all()[1].id, "dusk-2021");
    }

    #[test]
    fn test_mark_verified_unknown_id() {
        let mut store = CatalogStore::new();
        store.replace_all(vec![artwork("Dusk", "2021")]);
        assert!(!store.mark_verified("nope"));
    }

    #[test]
    fn test_mark_verified_never_reverses() {
        let mut store = CatalogStore::new();
        store.replace_all(vec![artwork("Dusk", "2021")]);
        assert!(store.mark_verified("dusk-2021"));
        assert!(store.mark_verified("dusk-2021"));
        assert_eq!(
            store.get("dusk-2021").unwrap().status,
            ArtworkStatus::Verified
        );
    }
}
