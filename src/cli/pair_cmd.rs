//! Run the full pairing workflow for one artwork.

use crate::catalog::CatalogStore;
use crate::cli::output;
use crate::config::Config;
use crate::device::simulated::SimulatedDevice;
use crate::device::{self, TagDevice};
use crate::events::EventBus;
use crate::pairing::{PairingSession, PairingState};
use anyhow::Result;
use std::sync::{Arc, Mutex};

/// Load the catalog, select `artwork_id`, and drive the machine
/// `Idle → Scanning → Encoding → Success`.
///
/// `--simulate` swaps in an in-process device that discovers one tag and
/// accepts the write, for exercising the workflow on hosts without NFC.
pub async fn run(artwork_id: &str, base_url: Option<&str>, simulate: bool) -> Result<()> {
    let mut config = Config::default();
    if let Some(base) = base_url {
        config = config.with_base_url(base);
    }

    let device: Arc<dyn TagDevice> = if simulate {
        Arc::new(SimulatedDevice::with_tags(&["04:a3:2f:11"]))
    } else {
        Arc::from(device::detect())
    };

    let store = Arc::new(Mutex::new(CatalogStore::new()));
    let bus = Arc::new(EventBus::default());
    let mut session = PairingSession::new(config, device, Arc::clone(&store), bus);

    let count = session.load_catalog().await?;
    if !output::is_quiet() {
        eprintln!("  catalog loaded: {count} artwork(s)");
    }

    session.select(artwork_id).await?;
    if !output::is_quiet() {
        let url = session.certificate().map(|c| c.url.as_str()).unwrap_or("");
        eprintln!("  certificate resolved: {url}");
        eprintln!("  scanning — bring a tag into range…");
    }

    session.pair().await?;

    match session.state() {
        PairingState::Success => {
            let record = store
                .lock()
                .expect("store lock poisoned")
                .get(artwork_id)
                .cloned();
            if output::is_json() {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("  paired: {artwork_id} is now Verified");
            }
            Ok(())
        }
        other => anyhow::bail!("pairing ended in unexpected state {other:?}"),
    }
}
