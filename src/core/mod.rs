//! Core dispatcher types and traits

pub mod clog;
pub mod error;
pub mod log_level;
pub mod metrics;
pub mod record;
pub mod sink;
pub mod terminator;
pub mod timestamp;

pub use self::clog::{Clog, ClogBuilder, SinkErrorCallback};
pub use error::{ClogError, Result};
pub use log_level::LogLevel;
pub use metrics::ClogMetrics;
pub use record::{Record, LEVEL_LABEL_WIDTH};
pub use sink::{LevelRange, Output, Sink};
pub use terminator::{ProcessExit, Terminator, FATAL_EXIT_CODE};
