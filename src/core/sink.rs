//! Sink trait for log output destinations

use super::error::Result;
use super::log_level::LogLevel;
use std::sync::Arc;

/// A destination that accepts rendered record bytes.
///
/// Sinks are shared between dispatchers through `Arc`, so every method takes
/// `&self` and implementations bring their own locking.
pub trait Sink: Send + Sync {
    /// Write the bytes, returning how many were written.
    fn write(&self, buf: &[u8]) -> Result<usize>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Inclusive range of levels a binding admits.
///
/// A range whose `min` is above its `max` is empty and admits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    pub min: LogLevel,
    pub max: LogLevel,
}

impl LevelRange {
    pub const fn new(min: LogLevel, max: LogLevel) -> Self {
        Self { min, max }
    }

    /// `level` and everything more critical.
    pub const fn at_least(level: LogLevel) -> Self {
        Self::new(level, LogLevel::MAX)
    }

    #[inline]
    pub fn contains(&self, level: LogLevel) -> bool {
        self.min <= level && level <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// A registered pairing of a sink and the levels it receives.
#[derive(Clone)]
pub struct Output {
    pub sink: Arc<dyn Sink>,
    pub range: LevelRange,
}

impl Output {
    pub fn new(sink: Arc<dyn Sink>, range: LevelRange) -> Self {
        Self { sink, range }
    }

    #[inline]
    pub fn admits(&self, level: LogLevel) -> bool {
        self.range.contains(level)
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output")
            .field("sink", &self.sink.name())
            .field("range", &self.range)
            .finish()
    }
}
