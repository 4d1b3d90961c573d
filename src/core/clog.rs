//! Sink registry and dispatcher

use super::{
    error::{ClogError, Result},
    log_level::LogLevel,
    metrics::ClogMetrics,
    record::Record,
    sink::{LevelRange, Output, Sink},
    terminator::{ProcessExit, Terminator, FATAL_EXIT_CODE},
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Called with the sink name and error whenever a sink write fails.
///
/// The callback runs while the dispatcher lock is held and must not log to
/// the same [`Clog`].
pub type SinkErrorCallback = Arc<dyn Fn(&str, &ClogError) + Send + Sync>;

/// Routes each record to every registered output whose level range admits it.
///
/// A single lock covers both registration and delivery, so one call's
/// fan-out finishes before the next call or registration starts. Sink
/// failures are counted in [`ClogMetrics`] and never reach the caller.
///
/// # Example
///
/// ```
/// use clog::prelude::*;
/// use std::sync::Arc;
///
/// let clog = Clog::new();
/// let sink = Arc::new(WriterSink::new(Vec::new()));
/// clog.add_output(sink.clone(), LogLevel::Warn);
///
/// clog.info("not delivered");
/// clog.error("delivered");
///
/// let written = String::from_utf8(sink.lock().clone()).unwrap();
/// assert!(written.ends_with("[Error] delivered\n"));
/// ```
pub struct Clog {
    outputs: Mutex<Vec<Output>>,
    exit_on_fatal: AtomicBool,
    terminator: Arc<dyn Terminator>,
    metrics: Arc<ClogMetrics>,
    on_sink_error: Option<SinkErrorCallback>,
}

impl Clog {
    #[must_use]
    pub fn new() -> Self {
        Self {
            outputs: Mutex::new(Vec::new()),
            exit_on_fatal: AtomicBool::new(false),
            terminator: Arc::new(ProcessExit),
            metrics: Arc::new(ClogMetrics::new()),
            on_sink_error: None,
        }
    }

    /// Register `sink` for `level` and everything more critical.
    pub fn add_output(&self, sink: Arc<dyn Sink>, level: LogLevel) {
        self.push_output(Output::new(sink, LevelRange::at_least(level)));
    }

    /// Register `sink` for exactly `[level_min, level_max]`.
    ///
    /// If `level_min` is above `level_max` the output is inert: it is kept
    /// but never receives a record.
    pub fn add_output_range(&self, sink: Arc<dyn Sink>, level_min: LogLevel, level_max: LogLevel) {
        self.push_output(Output::new(sink, LevelRange::new(level_min, level_max)));
    }

    fn push_output(&self, output: Output) {
        let mut outputs = self.outputs.lock();
        outputs.push(output);
    }

    pub fn output_count(&self) -> usize {
        self.outputs.lock().len()
    }

    /// Whether `fatal` terminates the process after delivery.
    pub fn exit_on_fatal(&self) -> bool {
        self.exit_on_fatal.load(Ordering::Relaxed)
    }

    pub fn set_exit_on_fatal(&self, enabled: bool) {
        self.exit_on_fatal.store(enabled, Ordering::Relaxed);
    }

    /// Render `message` once and deliver it to every admitting output, in
    /// registration order.
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        let record = Record::new(level, message.to_string());
        let rendered = record.render();
        self.metrics.record_logged();

        let outputs = self.outputs.lock();
        self.dispatch(&outputs, level, rendered.as_bytes());
    }

    /// Deliver to each output with per-sink panic isolation
    fn dispatch(&self, outputs: &[Output], level: LogLevel, bytes: &[u8]) {
        for (idx, output) in outputs.iter().enumerate() {
            if !output.admits(level) {
                continue;
            }

            let write_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                output.sink.write(bytes)
            }));

            match write_result {
                Ok(Ok(_)) => {
                    self.metrics.record_delivery();
                }
                Ok(Err(e)) => {
                    self.metrics.record_write_failure();
                    self.notify_sink_error(output.sink.name(), &e);
                }
                Err(panic_info) => {
                    self.metrics.record_sink_panic();
                    let panic_msg = panic_message(&*panic_info);
                    eprintln!(
                        "[CLOG CRITICAL] Sink #{} ({}) panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        output.sink.name(),
                        panic_msg
                    );
                    let err = ClogError::sink_panicked(output.sink.name(), panic_msg);
                    self.notify_sink_error(output.sink.name(), &err);
                }
            }
        }
    }

    fn notify_sink_error(&self, sink_name: &str, err: &ClogError) {
        if let Some(ref callback) = self.on_sink_error {
            callback(sink_name, err);
        }
    }

    /// Flush every registered sink.
    ///
    /// All sinks are flushed even if one fails; the first error is returned.
    pub fn flush(&self) -> Result<()> {
        let outputs = self.outputs.lock();
        let mut first_err = None;
        for output in outputs.iter() {
            if let Err(e) = output.sink.flush() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn metrics(&self) -> &ClogMetrics {
        &self.metrics
    }

    #[inline]
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn warning(&self, message: impl fmt::Display) {
        self.warn(message);
    }

    #[inline]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    /// Log at `Fatal`, then terminate the process if `exit_on_fatal` is set.
    ///
    /// Sinks are flushed before the terminator runs, since process exit
    /// skips destructors.
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, message);
        if self.exit_on_fatal() {
            if let Err(e) = self.flush() {
                eprintln!("[CLOG ERROR] Failed to flush before exit: {}", e);
            }
            self.terminator.terminate(FATAL_EXIT_CODE);
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Clog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Clog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clog")
            .field("outputs", &*self.outputs.lock())
            .field("exit_on_fatal", &self.exit_on_fatal())
            .finish_non_exhaustive()
    }
}

impl Drop for Clog {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[CLOG ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing a [`Clog`] with a fluent API
///
/// # Example
/// ```
/// use clog::prelude::*;
/// use std::sync::Arc;
///
/// let stdout = Arc::new(ConsoleSink::stdout());
/// let clog = Clog::builder()
///     .output(stdout.clone(), LogLevel::Warn)
///     .output_range(stdout, LogLevel::Debug, LogLevel::Info)
///     .on_sink_error(Arc::new(|sink, err| {
///         eprintln!("sink {} failed: {}", sink, err);
///     }))
///     .build();
/// assert_eq!(clog.output_count(), 2);
/// ```
pub struct ClogBuilder {
    outputs: Vec<Output>,
    exit_on_fatal: bool,
    terminator: Option<Arc<dyn Terminator>>,
    on_sink_error: Option<SinkErrorCallback>,
}

impl ClogBuilder {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
            exit_on_fatal: false,
            terminator: None,
            on_sink_error: None,
        }
    }

    /// Add an output receiving `level` and everything more critical
    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, sink: Arc<dyn Sink>, level: LogLevel) -> Self {
        self.outputs.push(Output::new(sink, LevelRange::at_least(level)));
        self
    }

    /// Add an output receiving exactly `[level_min, level_max]`
    #[must_use = "builder methods return a new value"]
    pub fn output_range(
        mut self,
        sink: Arc<dyn Sink>,
        level_min: LogLevel,
        level_max: LogLevel,
    ) -> Self {
        self.outputs
            .push(Output::new(sink, LevelRange::new(level_min, level_max)));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_on_fatal(mut self, enabled: bool) -> Self {
        self.exit_on_fatal = enabled;
        self
    }

    /// Replace the default [`ProcessExit`] terminator
    #[must_use = "builder methods return a new value"]
    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = Some(terminator);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_sink_error(mut self, callback: SinkErrorCallback) -> Self {
        self.on_sink_error = Some(callback);
        self
    }

    pub fn build(self) -> Clog {
        let mut clog = Clog::new();
        if let Some(terminator) = self.terminator {
            clog.terminator = terminator;
        }
        clog.on_sink_error = self.on_sink_error;
        clog.set_exit_on_fatal(self.exit_on_fatal);
        for output in self.outputs {
            clog.push_output(output);
        }
        clog
    }
}

impl Default for ClogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Clog {
    /// Create a builder for Clog
    #[must_use]
    pub fn builder() -> ClogBuilder {
        ClogBuilder::new()
    }
}
