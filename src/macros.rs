//! Logging macros with `format!`-style arguments.
//!
//! Each macro takes the dispatcher first and expands to `format_args!`, so
//! the message is only rendered once, inside the dispatcher.
//!
//! # Examples
//!
//! ```
//! use clog::prelude::*;
//! use clog::info;
//!
//! let clog = Clog::new();
//!
//! info!(clog, "Server started");
//!
//! let port = 8080;
//! info!(clog, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use clog::prelude::*;
/// # let clog = Clog::new();
/// use clog::log;
/// log!(clog, LogLevel::Info, "Simple message");
/// log!(clog, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($clog:expr, $level:expr, $($arg:tt)+) => {
        $clog.log($level, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($clog:expr, $($arg:tt)+) => {
        $clog.trace(format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($clog:expr, $($arg:tt)+) => {
        $clog.debug(format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use clog::prelude::*;
/// # let clog = Clog::new();
/// use clog::info;
/// info!(clog, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($clog:expr, $($arg:tt)+) => {
        $clog.info(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($clog:expr, $($arg:tt)+) => {
        $clog.warn(format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($clog:expr, $($arg:tt)+) => {
        $clog.error(format_args!($($arg)+))
    };
}

/// Log a fatal-level message.
///
/// Terminates the process afterwards when the dispatcher has
/// `exit_on_fatal` set.
///
/// # Examples
///
/// ```
/// # use clog::prelude::*;
/// # let clog = Clog::new();
/// use clog::fatal;
/// fatal!(clog, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($clog:expr, $($arg:tt)+) => {
        $clog.fatal(format_args!($($arg)+))
    };
}
