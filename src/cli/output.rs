//! Global output flags, shared across subcommands via environment variables.

/// Whether `--json` was passed.
pub fn is_json() -> bool {
    std::env::var("VERITAG_JSON").is_ok()
}

/// Whether `--quiet` was passed.
pub fn is_quiet() -> bool {
    std::env::var("VERITAG_QUIET").is_ok()
}
