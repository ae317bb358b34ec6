//! Logger setup.

use crate::config::LogLevel;

/// Install `env_logger` with `level` as the default filter. `RUST_LOG`
/// still wins when set.
///
/// Returns false if a logger was already installed; the maximum level is
/// then adjusted to `level` instead.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) -> bool {
    let env = env_logger::Env::default().default_filter_or(level.to_level_filter().as_str());
    match env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
    {
        Ok(()) => {
            log::debug!("📝 Logging initialised at {}", level.name());
            true
        }
        Err(_) => {
            set_level(level);
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) -> bool {
    set_level(level);
    false
}

/// Change verbosity at runtime.
pub fn set_level(level: LogLevel) {
    log::set_max_level(level.to_level_filter());
    log::debug!("Log level set to {}", level.name());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init(LogLevel::Debug);
        assert!(!init(LogLevel::Warn));
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }
}
