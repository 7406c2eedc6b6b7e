//! Log capture for unit tests.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = RECORDS.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Install the capturing logger; later calls are no-ops
pub(crate) fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Whether a record at exactly `level` containing every needle was logged.
///
/// Tests run in parallel, so needles should include something unique to the test
/// such as a temp directory path.
pub(crate) fn logged(level: Level, needles: &[&str]) -> bool {
    RECORDS
        .lock()
        .map(|records| {
            records
                .iter()
                .any(|(l, msg)| *l == level && needles.iter().all(|n| msg.contains(n)))
        })
        .unwrap_or(false)
}
