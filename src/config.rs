//! Startup configuration
//!
//! Describes a set of outputs in JSON and wires them into a [`Clog`]:
//!
//! ```
//! use clog::config::ClogConfig;
//!
//! let config = ClogConfig::from_json_str(r#"{
//!     "outputs": [
//!         { "target": { "type": "stdout" }, "min_level": "Warn" },
//!         { "target": { "type": "stdout" }, "min_level": "Debug", "max_level": "Info" }
//!     ]
//! }"#).unwrap();
//!
//! let clog = config.build().unwrap();
//! assert_eq!(clog.output_count(), 2);
//! ```

use crate::core::{Clog, ClogError, LevelRange, LogLevel, Result, Sink};
use crate::sinks::daily_file::validate_template;
use crate::sinks::{ConsoleSink, DailyFileSink, FileSink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where an output writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputTarget {
    Stdout,
    Stderr,
    File { path: PathBuf },
    DailyFile { template: String },
}

/// One output binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub target: OutputTarget,
    pub min_level: LogLevel,
    /// Defaults to `Fatal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level: Option<LogLevel>,
}

impl OutputConfig {
    pub fn range(&self) -> LevelRange {
        LevelRange::new(self.min_level, self.max_level.unwrap_or(LogLevel::MAX))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClogConfig {
    #[serde(default)]
    pub exit_on_fatal: bool,
    #[serde(default)]
    pub outputs: Vec<OutputConfig>,
}

impl ClogConfig {
    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClogError::io_operation(
                "reading configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject outputs that could never receive a record and malformed
    /// daily file templates.
    ///
    /// [`Clog::add_output_range`] accepts an inverted range silently; a
    /// configuration file asking for one is treated as a mistake instead.
    pub fn validate(&self) -> Result<()> {
        for (idx, output) in self.outputs.iter().enumerate() {
            if output.range().is_empty() {
                return Err(ClogError::config(
                    format!("outputs[{}]", idx),
                    format!(
                        "min_level {} is above max_level {}",
                        output.min_level,
                        output.max_level.unwrap_or(LogLevel::MAX)
                    ),
                ));
            }
            if let OutputTarget::DailyFile { template } = &output.target {
                validate_template(template)?;
            }
        }
        Ok(())
    }

    /// Validate and build a dispatcher.
    ///
    /// Outputs naming the same target share one sink instance, so two
    /// bindings on one file never race each other at the filesystem level.
    pub fn build(&self) -> Result<Clog> {
        self.validate()?;

        let mut sinks: HashMap<OutputTarget, Arc<dyn Sink>> = HashMap::new();
        let clog = Clog::new();
        clog.set_exit_on_fatal(self.exit_on_fatal);

        for output in &self.outputs {
            let sink = match sinks.get(&output.target) {
                Some(sink) => Arc::clone(sink),
                None => {
                    let sink = create_sink(&output.target)?;
                    sinks.insert(output.target.clone(), Arc::clone(&sink));
                    sink
                }
            };
            let range = output.range();
            clog.add_output_range(sink, range.min, range.max);
        }

        Ok(clog)
    }
}

fn create_sink(target: &OutputTarget) -> Result<Arc<dyn Sink>> {
    let sink: Arc<dyn Sink> = match target {
        OutputTarget::Stdout => Arc::new(ConsoleSink::stdout()),
        OutputTarget::Stderr => Arc::new(ConsoleSink::stderr()),
        OutputTarget::File { path } => Arc::new(FileSink::new(path.clone())),
        OutputTarget::DailyFile { template } => Arc::new(DailyFileSink::new(template.clone())?),
    };
    Ok(sink)
}
