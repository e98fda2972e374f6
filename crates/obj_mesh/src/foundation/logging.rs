//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use log::LevelFilter;

/// Initialize the logging system
///
/// `RUST_LOG` still takes precedence for individual modules; `level` sets the
/// global filter. Unknown level names fall back to `info`. Calling this again
/// after a logger is installed leaves the first one in place.
pub fn init(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    if env_logger::Builder::from_default_env()
        .filter_level(filter)
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init("debug");
        init("not-a-level");
        info!("logging initialized");
    }
}
