//! Environment readiness check.

use crate::config::Config;
use crate::device;
use anyhow::Result;

/// Check platform details, NFC capability, and upstream reachability.
pub async fn run(base_url: Option<&str>) -> Result<()> {
    println!("Veritag Doctor");
    println!("==============");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    let nfc_supported = device::detect().supported();
    if nfc_supported {
        println!("[OK] NFC device available");
    } else {
        println!("[!!] NFC unsupported on this device. Use `veritag pair --simulate` to exercise the workflow.");
    }

    let mut config = Config::default();
    if let Some(base) = base_url {
        config = config.with_base_url(base);
    }
    let reachable = check_upstream(&config).await;
    match &reachable {
        Ok(status) => println!("[OK] Upstream reachable: {} (HTTP {status})", config.base_url),
        Err(e) => println!("[!!] Upstream unreachable: {} ({e})", config.base_url),
    }

    println!();
    if nfc_supported && reachable.is_ok() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }
    Ok(())
}

async fn check_upstream(config: &Config) -> Result<u16> {
    let client = reqwest::Client::builder()
        .timeout(config.fetch_timeout())
        .build()?;
    let resp = client.get(format!("{}/", config.base_url)).send().await?;
    Ok(resp.status().as_u16())
}
