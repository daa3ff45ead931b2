//! Integration test: the pull-back console record follows `enable_debug`
//!
//! Runs in its own test binary so the capturing logger is the only global
//! logger installed.

use leash_core::config::Settings;
use leash_core::host::MemoryHost;
use leash_core::leash::evaluate;
use leash_core::logging::LOG_TARGET;
use leash_core::Vec3;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

/// Keeps every record sent to the crate's log target
struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target() == LOG_TARGET
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.records
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn pull_back_records() -> Vec<(Level, String)> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .drain(..)
        .filter(|(_, text)| text.starts_with("Pulled heli back"))
        .collect()
}

fn pull_back_once(enable_debug: bool) {
    let mut host = MemoryHost::new();
    let heli = host.spawn_helicopter(Vec3::new(1000.0, 0.0, 400.0), 350.0);
    let attacker = host.add_player("Alice", Vec3::new(1000.0, 0.0, 0.0));

    let mut settings = Settings::default();
    settings.leash.enable_debug = enable_debug;

    let outcome = evaluate(&mut host, heli, attacker, &settings);
    assert!(outcome.is_retarget());
}

// One test function, since the logger and its buffer are process-wide.
#[test]
fn test_pull_back_record_follows_enable_debug() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    pull_back_once(false);
    assert!(pull_back_records().is_empty());

    pull_back_once(true);
    let records = pull_back_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Info);
    assert_eq!(records[0].1, "Pulled heli back to Alice, distance was 400.0m.");
}
