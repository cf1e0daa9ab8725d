//! Network acquisition — HTTP fetching of listing and detail pages.

pub mod fetcher;

pub use fetcher::CatalogFetcher;
