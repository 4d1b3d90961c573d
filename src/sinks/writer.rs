//! Adapter turning any `io::Write` into a sink

use crate::core::{Result, Sink};
use parking_lot::{Mutex, MutexGuard};
use std::io::Write;

/// Wraps a writer in a mutex so it can be shared as a [`Sink`].
///
/// Useful for writers that are not thread-safe on their own, and for
/// capturing output in memory:
///
/// ```
/// use clog::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(WriterSink::new(Vec::new()));
/// let clog = Clog::new();
/// clog.add_output(sink.clone(), LogLevel::Info);
/// clog.info("captured");
///
/// assert!(sink.lock().ends_with(b"captured\n"));
/// ```
#[derive(Debug)]
pub struct WriterSink<W> {
    name: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named("writer", writer)
    }

    /// Create a sink reported under `name` in diagnostics.
    pub fn named(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Lock and access the wrapped writer.
    pub fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, buf: &[u8]) -> Result<usize> {
        self.writer.lock().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
