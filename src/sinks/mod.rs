//! Sink implementations

pub mod console;
pub mod daily_file;
pub mod file;
pub mod writer;

pub use console::{ConsoleSink, ConsoleStream};
pub use daily_file::{DailyFileSink, DateSource};
pub use file::FileSink;
pub use writer::WriterSink;

pub use crate::core::Sink;
