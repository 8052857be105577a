//! Browser-backed implementations of the domain logging traits.

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};

/// Logger writing to the browser console, one console method per level
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    /// Debug builds log everything from `Debug` up, release builds from `Info`.
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) { Self::new(LogLevel::Debug) } else { Self::new(LogLevel::Info) }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn format_log_entry(&self, entry: &LogEntry) -> String {
        let timestamp = get_time_provider().format_timestamp(entry.timestamp);
        match &entry.metadata {
            Some(metadata) => format!(
                "[{}] {} {} | {} | {}",
                timestamp, entry.level, entry.component, entry.message, metadata
            ),
            None => format!("[{}] {} {} | {}", timestamp, entry.level, entry.component, entry.message),
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = self.format_log_entry(&entry);
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted.into()),
            LogLevel::Info => web_sys::console::info_1(&formatted.into()),
            LogLevel::Warn => web_sys::console::warn_1(&formatted.into()),
            LogLevel::Error => web_sys::console::error_1(&formatted.into()),
        }
    }
}

/// Wall clock from `Date.now()`
pub struct BrowserTimeProvider;

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// Install the console logger and browser clock.
pub fn initialize_browser_logging() {
    crate::domain::logging::init_time_provider(Box::new(BrowserTimeProvider));
    crate::domain::logging::init_logger(Box::new(ConsoleLogger::for_build()));
}
