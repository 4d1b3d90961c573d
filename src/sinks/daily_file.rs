//! File sink that starts a new file each day
//!
//! The path is built from a template holding one `{date}` placeholder, e.g.
//! `/var/log/myprocess_{date}.log` becomes `/var/log/myprocess_2025-01-08.log`.

use super::file::{open_append, write_through};
use crate::core::timestamp;
use crate::core::{ClogError, Result, Sink};
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Placeholder substituted with the current date.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Supplies the date used to pick the current file.
pub type DateSource = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Default)]
struct DailyState {
    file: Option<File>,
    date: Option<NaiveDate>,
    path: Option<PathBuf>,
}

impl DailyState {
    fn close(&mut self) {
        self.file = None;
        self.date = None;
        self.path = None;
    }
}

/// A lazily opened file sink whose file name embeds the current date.
///
/// Before every write the current date is compared with the date of the
/// open file. When it differs the old handle is closed and the file for the
/// new date is opened. Opening behaves like [`FileSink`](super::FileSink):
/// nothing happens until the first write, and a failed open is retried on
/// the next one.
///
/// # Examples
///
/// ```no_run
/// use clog::prelude::*;
/// use std::sync::Arc;
///
/// let clog = Clog::new();
/// let daily = Arc::new(DailyFileSink::new("/opt/logs/myprocess_{date}.log").unwrap());
/// clog.add_output(daily, LogLevel::Trace);
/// clog.info("goes to today's file");
/// ```
pub struct DailyFileSink {
    template: String,
    date_source: DateSource,
    state: Mutex<DailyState>,
}

impl DailyFileSink {
    /// Create a sink using the local calendar date.
    ///
    /// # Errors
    ///
    /// Returns error if the template does not contain exactly one `{date}`.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        Self::with_date_source(template, Arc::new(timestamp::today))
    }

    /// Create a sink with a custom date source.
    ///
    /// # Errors
    ///
    /// Returns error if the template does not contain exactly one `{date}`.
    pub fn with_date_source(template: impl Into<String>, date_source: DateSource) -> Result<Self> {
        let template = template.into();
        validate_template(&template)?;
        Ok(Self {
            template,
            date_source,
            state: Mutex::new(DailyState::default()),
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Path of the file used for `date`.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        PathBuf::from(
            self.template
                .replacen(DATE_PLACEHOLDER, &timestamp::format_file_date(date), 1),
        )
    }

    /// Path of the currently open file, if any.
    pub fn current_path(&self) -> Option<PathBuf> {
        self.state.lock().path.clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().file.is_some()
    }

    /// Release the file handle. Closing a closed sink does nothing.
    pub fn close(&self) {
        self.state.lock().close();
    }
}

/// Check that `template` holds exactly one date placeholder.
pub fn validate_template(template: &str) -> Result<()> {
    match template.matches(DATE_PLACEHOLDER).count() {
        1 => Ok(()),
        0 => Err(ClogError::template(
            template,
            format!("missing {} placeholder", DATE_PLACEHOLDER),
        )),
        n => Err(ClogError::template(
            template,
            format!("expected one {} placeholder, found {}", DATE_PLACEHOLDER, n),
        )),
    }
}

impl Sink for DailyFileSink {
    fn write(&self, buf: &[u8]) -> Result<usize> {
        let today = (self.date_source)();
        let mut state = self.state.lock();

        if state.date.is_some_and(|date| date != today) {
            state.close();
        }

        let file = match state.file.take() {
            Some(file) => file,
            None => {
                let path = self.path_for(today);
                let file = open_append(&path)?;
                state.date = Some(today);
                state.path = Some(path);
                file
            }
        };
        let file = state.file.insert(file);
        let path = self.path_for(today);
        write_through(file, &path, buf)
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(file) = state.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "daily_file"
    }
}

impl std::fmt::Debug for DailyFileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyFileSink")
            .field("template", &self.template)
            .field("current_path", &self.current_path())
            .finish_non_exhaustive()
    }
}
