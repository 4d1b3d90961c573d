//! Lazily opened file sink

use crate::core::{ClogError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Open `path` for appending, creating the file but not its parent directories.
pub(crate) fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            eprintln!("[CLOG] Unable to open {} for writing: {}", path.display(), e);
            ClogError::file_open(path.display().to_string(), e)
        })
}

/// Write all of `buf` through `file`, reporting failures against `path`.
pub(crate) fn write_through(file: &mut File, path: &Path, buf: &[u8]) -> Result<usize> {
    file.write_all(buf).map_err(|e| {
        ClogError::io_operation("writing log file", path.display().to_string(), e)
    })?;
    Ok(buf.len())
}

/// A file sink that opens its file on first write.
///
/// Construction performs no I/O. If opening fails the sink stays closed and
/// the next write tries again, so a sink pointed at a directory that does
/// not exist yet starts working once the directory appears.
///
/// # Examples
///
/// ```no_run
/// use clog::prelude::*;
/// use std::sync::Arc;
///
/// let clog = Clog::new();
/// let file = Arc::new(FileSink::new("/var/log/app.log"));
/// clog.add_output(file.clone(), LogLevel::Warn);
///
/// clog.error("written to /var/log/app.log");
/// file.close();
/// ```
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a file handle is currently held.
    pub fn is_open(&self) -> bool {
        self.file.lock().is_some()
    }

    /// Release the file handle. Closing a closed sink does nothing.
    pub fn close(&self) {
        self.file.lock().take();
    }

    /// Close any held handle and open the file again.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened; the sink is left closed.
    pub fn reopen(&self) -> Result<()> {
        let mut file = self.file.lock();
        file.take();
        *file = Some(open_append(&self.path)?);
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&self, buf: &[u8]) -> Result<usize> {
        let mut guard = self.file.lock();
        let file = match guard.take() {
            Some(file) => file,
            None => open_append(&self.path)?,
        };
        let file = guard.insert(file);
        write_through(file, &self.path, buf)
    }

    fn flush(&self) -> Result<()> {
        let mut guard = self.file.lock();
        if let Some(file) = guard.as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
