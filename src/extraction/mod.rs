//! Parse structured artwork data from raw listing and detail HTML.
//!
//! This is the extraction engine: CSS selector-based parsing via the
//! `scraper` crate, no DOM rendering and no JavaScript execution. Listing
//! extraction is tolerant (missing fields become empty strings); certificate
//! extraction is a hard failure when the expected anchor is absent, because
//! the pairing workflow cannot proceed without it.

use crate::catalog::{derive_id, Artwork, ArtworkStatus};
use crate::error::{PairingError, PairingResult};
use scraper::{ElementRef, Html, Selector};

/// Extract every catalog preview card from listing HTML, in document order.
///
/// A malformed card never aborts the whole extraction: any missing field is
/// carried through as an empty string and the remaining cards still parse.
/// Every record starts `Unverified`.
pub fn extract_listing(html: &str) -> Vec<Artwork> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse(r#"article[data-test="previewCard"]"#).unwrap();
    let title_sel = Selector::parse(".ver-text-lg .ver-truncate").unwrap();
    let artist_sel = Selector::parse(".ver-text-base.ver-font-bold").unwrap();
    let year_sel = Selector::parse(".ver-text-lg .ver-inline").unwrap();
    let image_sel = Selector::parse("img").unwrap();

    let mut artworks = Vec::new();
    for card in document.select(&card_sel) {
        let title = select_text(&card, &title_sel);
        let artist = select_text(&card, &artist_sel);
        // Year renders as e.g. ", 2019" next to the title; commas stripped.
        let year = select_text(&card, &year_sel).replace(',', "").trim().to_string();
        let image_url = card
            .select(&image_sel)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or("")
            .to_string();

        artworks.push(Artwork {
            id: derive_id(&title, &year),
            title,
            artist,
            year,
            image_url,
            status: ArtworkStatus::Unverified,
        });
    }
    artworks
}

/// Extract the certificate URL from detail HTML.
///
/// Finds the first anchor whose `href` begins with `certificate_prefix`.
/// Anything else on the page is ignored. Fails with
/// [`PairingError::Extraction`] when no such anchor exists.
pub fn extract_certificate_url(html: &str, certificate_prefix: &str) -> PairingResult<String> {
    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").unwrap();

    document
        .select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| href.starts_with(certificate_prefix))
        .map(|href| href.to_string())
        .ok_or_else(|| PairingError::Extraction("certificate link not found".to_string()))
}

/// Joined, trimmed text of the first node matching `sel` under `root`.
/// Empty string when no node matches.
fn select_text(root: &ElementRef<'_>, sel: &Selector) -> String {
    root.select(sel)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .unwrap_or_default()
}
