//! CLI subcommand implementations for the veritag binary.

pub mod doctor;
pub mod list_cmd;
pub mod output;
pub mod pair_cmd;
