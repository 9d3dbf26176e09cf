//! Diagnostics on stderr. The level comes from `IVAL_LOG` and defaults to
//! warnings only; `:s debug` raises it from inside the REPL.

use std::env;
use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

pub const ENV_VAR: &str = "IVAL_LOG";

struct Logger;

static LOGGER: Logger = Logger;

const fn color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m",
        Level::Warn => "\x1b[33m",
        Level::Info => "\x1b[32m",
        Level::Debug => "\x1b[36m",
        Level::Trace => "\x1b[35m",
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = record.level();
        let target = record.module_path().unwrap_or_else(|| record.target());
        // a closed stderr is not worth aborting over
        let _ = writeln!(
            std::io::stderr().lock(),
            "{}[{level:<5}]\x1b[0m \x1b[90m{target}\x1b[0m {}",
            color(level),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_from_env() -> LevelFilter {
    env::var(ENV_VAR)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_from_env());
    }
}

/// Switches between the `IVAL_LOG` level and full debug output.
pub fn set_debug(debug: bool) {
    let level = if debug { LevelFilter::Debug } else { level_from_env() };
    log::set_max_level(level);
}
