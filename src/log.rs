use std::env;

use log::LevelFilter;

/// Environment variable that turns on debug logging.
pub const DEBUG_ENV_VAR: &str = "VARMATCH_DEBUG";

/// Initialize logging for the CLI.
///
/// Logs at `Debug` if `debug_enabled` is true, otherwise at `Info`.
/// `RUST_LOG` overrides both when set.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // a second initialization (e.g. from tests) keeps the first logger
    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}

/// True when `VARMATCH_DEBUG` is set to anything but `0` or `false`.
#[must_use]
pub fn debug_from_env() -> bool {
    env::var(DEBUG_ENV_VAR).is_ok_and(|value| !matches!(value.as_str(), "" | "0" | "false"))
}
