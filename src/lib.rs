// Copyright 2026 Veritag Contributors
// SPDX-License-Identifier: Apache-2.0

//! Veritag runtime library — pair physical NFC tags with artwork certificates.
//!
//! Ingests listing pages from an art-certification service, normalizes them
//! into an in-memory catalog, and drives the pairing workflow that writes a
//! certificate URL to a tag for one selected artwork.

pub mod acquisition;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod extraction;
pub mod pairing;

pub use config::Config;
pub use error::{PairingError, PairingResult};
