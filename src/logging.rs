//! Logging setup on top of the `log` facade. The store itself only emits
//! `log::*` records; the binary decides where they go by calling [`init`].

use crate::config::LoggingSettings;

/// Install `env_logger` with the configured default level. `RUST_LOG` still
/// wins when set. Calling this more than once keeps the first logger.
pub fn init(settings: &LoggingSettings) {
    let env = env_logger::Env::default().default_filter_or(settings.level.as_str());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
