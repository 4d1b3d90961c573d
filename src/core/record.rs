//! Rendered log records

use super::log_level::LogLevel;
use super::timestamp;
use chrono::{DateTime, Local};

/// Width of the bracketed level label.
pub const LEVEL_LABEL_WIDTH: usize = 5;

/// A single log call, captured at the moment it was made.
///
/// Records are never stored. The dispatcher renders one with [`Record::render`]
/// and hands the same bytes to every admitting sink.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl Record {
    pub fn new(level: LogLevel, message: String) -> Self {
        Self::at(level, message, timestamp::now())
    }

    /// Build a record with an explicit timestamp.
    pub fn at(level: LogLevel, message: String, timestamp: DateTime<Local>) -> Self {
        Self {
            level,
            message,
            timestamp,
        }
    }

    /// `"{timestamp} [{level:<5}] {message}\n"`
    pub fn render(&self) -> String {
        let timestamp = timestamp::format_record_timestamp(&self.timestamp);
        let mut output =
            String::with_capacity(timestamp.len() + LEVEL_LABEL_WIDTH + self.message.len() + 5);
        output.push_str(&timestamp);
        output.push_str(" [");
        output.push_str(&format!("{:<width$}", self.level, width = LEVEL_LABEL_WIDTH));
        output.push_str("] ");
        output.push_str(&self.message);
        output.push('\n');
        output
    }
}
