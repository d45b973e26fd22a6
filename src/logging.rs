//! Tracing setup for the `mediai` binary.
//!
//! Logging starts before the configuration is read so that config loading
//! can report what it did. Once the file is loaded its `logging.level` is
//! swapped in through a reload handle, unless `RUST_LOG` or `--verbose`
//! already decided the level.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Environment variable naming the crate log level
pub const LOG_LEVEL_VAR: &str = "MEDIAI_LOG_LEVEL";

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Level to start with, before any config file has been read
pub fn startup_level(verbose: bool, env_level: Option<&str>) -> &str {
    if verbose {
        return "debug";
    }
    match env_level.map(str::trim) {
        Some(level) if !level.is_empty() => level,
        _ => "info",
    }
}

/// Filter showing `level` for this crate and warnings for dependencies
pub fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("mediai_assistant={level},mediai={level},warn"))
}

/// Install the global subscriber. Returns a handle for adjusting the level
/// later, or `None` when the level is already fixed.
pub fn init(verbose: bool) -> Option<FilterHandle> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
        return None;
    }

    let env_level = std::env::var(LOG_LEVEL_VAR).ok();
    let level = startup_level(verbose, env_level.as_deref());
    let (filter, handle) = reload::Layer::new(crate_filter(level));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();

    (!verbose).then_some(handle)
}

/// Apply the configured level through a handle returned by [`init`]
pub fn apply_level(handle: &FilterHandle, level: &str) {
    if let Err(e) = handle.reload(crate_filter(level)) {
        tracing::warn!("Could not apply log level '{}': {}", level, e);
    }
}
