//! Fetch the listing and print the catalog.

use crate::acquisition::CatalogFetcher;
use crate::cli::output;
use crate::config::Config;
use crate::extraction;
use anyhow::Result;

/// Fetch `<base>/`, extract every preview card, and print the records.
pub async fn run(base_url: Option<&str>) -> Result<()> {
    let mut config = Config::default();
    if let Some(base) = base_url {
        config = config.with_base_url(base);
    }

    let fetcher = CatalogFetcher::new(&config);
    let html = fetcher.fetch_listing().await?;
    let artworks = extraction::extract_listing(&html);

    if output::is_json() {
        println!("{}", serde_json::to_string_pretty(&artworks)?);
        return Ok(());
    }

    if artworks.is_empty() {
        println!("No artworks found at {}", config.base_url);
        return Ok(());
    }

    println!("{} artwork(s)", artworks.len());
    println!();
    for a in &artworks {
        println!("  {:<28} {:?}", a.id, a.status);
        if !output::is_quiet() {
            println!("      {} — {} ({})", a.title, a.artist, a.year);
        }
    }
    Ok(())
}
