//! Logging setup - `env_logger` wired to the `heli_leash` target
//!
//! The pull-back record is logged at info level whenever `enable_debug` is
//! set, so it shows without `--verbose`.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Target used for every log record emitted by this crate
pub const LOG_TARGET: &str = "heli_leash";

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug records are printed. Otherwise only info
/// level and above are shown. `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_target(true);

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests and hosts can call `init` more than once.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
