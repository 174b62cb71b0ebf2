use log::LevelFilter;

/// Logging thresholds, in ascending order of severity.
///
/// The crate logs through the `log` facade; the binary decides which logger
/// is installed. `set_log_level` only adjusts the global maximum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// The `log` filter that lets through messages at or above this level.
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            // `log` has no fatal level.
            LogLevel::Error | LogLevel::Fatal => LevelFilter::Error,
        }
    }

    /// Integer verbosity: 0 is `Fatal`, 5 and above is `Trace`.
    pub fn from_verbosity(threshold: i32) -> Self {
        match threshold {
            i32::MIN..=0 => LogLevel::Fatal,
            1 => LogLevel::Error,
            2 => LogLevel::Warning,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Set the minimum global logging level.
pub fn set_log_level(threshold: LogLevel) {
    log::set_max_level(threshold.to_filter());
}

/// Integer form of [`set_log_level`].
pub fn set_log_level_from_int(threshold: i32) {
    set_log_level(LogLevel::from_verbosity(threshold));
}
