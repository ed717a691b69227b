//! Captures log records emitted on the current test thread

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return every record it logged at `level` or above
pub fn capture<T>(level: Level, f: impl FnOnce() -> T) -> (T, Vec<String>) {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    RECORDS.with(|records| records.borrow_mut().clear());
    let result = f();
    let messages = RECORDS.with(|records| {
        records
            .borrow_mut()
            .drain(..)
            .filter(|(record_level, _)| *record_level <= level)
            .map(|(_, message)| message)
            .collect()
    });
    (result, messages)
}
