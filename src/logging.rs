//! Level-gated structured logging.
//!
//! Events go through [`tracing`]; whichever subscriber the application installs
//! is the sink. Without a subscriber the events cost next to nothing. On top of
//! the subscriber's own filtering, each engine and registry carries a
//! [`LogLevels`] bitset that decides which levels it emits at all.

use bitflags::bitflags;

use crate::config::{ConfigSource, LOG_LEVELS_KEY};

bitflags! {
    /// Combinable set of enabled log levels.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LogLevels: u8 {
        const TRACE       = 1 << 0;
        const DEBUG       = 1 << 1;
        const INFORMATION = 1 << 2;
        const WARNING     = 1 << 3;
        const ERROR       = 1 << 4;
        const FATAL       = 1 << 5;
    }
}

impl Default for LogLevels {
    fn default() -> Self {
        Self::ERROR | Self::FATAL
    }
}

impl LogLevels {
    /// Parses a list of level names such as `"Error, Fatal"` or `"debug|warning"`.
    ///
    /// Returns `None` if any name is unknown or the list is empty.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut levels = Self::empty();
        let mut seen = false;

        for name in value.split([',', '|']).map(str::trim).filter(|name| !name.is_empty()) {
            seen = true;
            levels |= match name.to_ascii_lowercase().as_str() {
                "trace" => Self::TRACE,
                "debug" => Self::DEBUG,
                "info" | "information" => Self::INFORMATION,
                "warn" | "warning" => Self::WARNING,
                "error" => Self::ERROR,
                "fatal" | "critical" => Self::FATAL,
                "all" => Self::all(),
                "none" => Self::empty(),
                _ => return None,
            };
        }

        seen.then_some(levels)
    }

    /// Reads the active levels from a configuration source.
    ///
    /// Missing or unparseable values fall back to [`LogLevels::default`].
    #[must_use]
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        source.get(LOG_LEVELS_KEY).and_then(|value| Self::parse(&value)).unwrap_or_default()
    }
}

/// Emits a tracing event when `$level` is enabled in `$levels`.
macro_rules! log_event {
    ($levels:expr, TRACE, $($arg:tt)+) => {
        if $levels.contains($crate::logging::LogLevels::TRACE) { tracing::trace!($($arg)+) }
    };
    ($levels:expr, DEBUG, $($arg:tt)+) => {
        if $levels.contains($crate::logging::LogLevels::DEBUG) { tracing::debug!($($arg)+) }
    };
    ($levels:expr, INFORMATION, $($arg:tt)+) => {
        if $levels.contains($crate::logging::LogLevels::INFORMATION) { tracing::info!($($arg)+) }
    };
    ($levels:expr, WARNING, $($arg:tt)+) => {
        if $levels.contains($crate::logging::LogLevels::WARNING) { tracing::warn!($($arg)+) }
    };
    ($levels:expr, ERROR, $($arg:tt)+) => {
        if $levels.contains($crate::logging::LogLevels::ERROR) { tracing::error!($($arg)+) }
    };
    ($levels:expr, FATAL, $($arg:tt)+) => {
        if $levels.contains($crate::logging::LogLevels::FATAL) { tracing::error!(fatal = true, $($arg)+) }
    };
}

pub(crate) use log_event;
