//! Injectable logging for list loading and reloading.
//!
//! Components take a [`Logger`] at construction. Without a callback, messages
//! go to the `log` facade.

use std::fmt;
use std::sync::Arc;

use log::Level;

/// Logger callback type for list parse and reload messages
type LoggerCallback = Arc<dyn Fn(Level, &str) + Send + Sync>;

const LOG_TARGET: &str = "dnsredir_namelist";

/// Logging capability handed to parsers, source items and source lists.
#[derive(Clone, Default)]
pub struct Logger {
    callback: Option<LoggerCallback>,
}

impl Logger {
    /// Logger forwarding to the `log` facade
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger delivering every message to `callback` instead of the `log` facade
    pub fn with_callback<F>(callback: F) -> Self
    where
        F: Fn(Level, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Some(Arc::new(callback)),
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        match self.callback {
            Some(ref callback) => callback(level, &args.to_string()),
            None => log::log!(target: LOG_TARGET, level, "{}", args),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    /// Logger that records every message for later inspection
    pub(crate) fn capture() -> (Logger, Arc<Mutex<Vec<(Level, String)>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = records.clone();
        let logger = Logger::with_callback(move |level, msg| {
            sink.lock().push((level, msg.to_string()));
        });
        (logger, records)
    }
}
