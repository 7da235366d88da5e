use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

/// Keeps every record so tests can look for the lines they expect.
struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// Installs the capturing logger. Safe to call from several tests.
pub fn install() {
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(LevelFilter::Trace);
}

pub fn contains(level: Level, needle: &str) -> bool {
    CAPTURE.records.lock().is_ok_and(|records| {
        records
            .iter()
            .any(|(at, message)| *at == level && message.contains(needle))
    })
}
