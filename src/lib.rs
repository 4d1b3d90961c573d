//! # clog
//!
//! A leveled logging facility. Each log call renders one timestamped record
//! and delivers it to every registered sink whose inclusive level range
//! admits the record's level.
//!
//! ## Features
//!
//! - **Range-filtered outputs**: bind any sink to `[min, max]`, or to a level
//!   and everything more critical
//! - **Lazy file sinks**: files open on first write and retry a failed open
//! - **Daily files**: a new file per calendar day from a `{date}` template
//! - **Failure isolation**: a broken sink never silences the others or the
//!   calling application
//!
//! ```
//! use clog::prelude::*;
//! use clog::info;
//! use std::sync::Arc;
//!
//! let clog = Clog::new();
//! let stdout = Arc::new(ConsoleSink::stdout());
//! clog.add_output(stdout.clone(), LogLevel::Warn);
//! clog.add_output_range(stdout, LogLevel::Debug, LogLevel::Info);
//!
//! info!(clog, "Pi is {}", std::f64::consts::PI);
//! ```

pub mod config;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::config::{ClogConfig, OutputConfig, OutputTarget};
    pub use crate::core::{
        Clog, ClogBuilder, ClogError, ClogMetrics, LevelRange, LogLevel, ProcessExit, Result,
        Sink, SinkErrorCallback, Terminator,
    };
    pub use crate::sinks::{ConsoleSink, DailyFileSink, FileSink, WriterSink};
}

pub use crate::config::{ClogConfig, OutputConfig, OutputTarget};
pub use crate::core::{
    Clog, ClogBuilder, ClogError, ClogMetrics, LevelRange, LogLevel, Output, ProcessExit, Record,
    Result, Sink, SinkErrorCallback, Terminator, FATAL_EXIT_CODE,
};
pub use crate::sinks::{ConsoleSink, ConsoleStream, DailyFileSink, FileSink, WriterSink};
