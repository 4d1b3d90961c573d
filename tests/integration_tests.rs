//! Integration tests for clog
//!
//! These tests verify:
//! - Record layout (timestamp, fixed-width label, message, newline)
//! - Range filtering and fan-out across bindings
//! - Lazy file sink lifecycle through the dispatcher
//! - Sink failure isolation

use clog::config::ClogConfig;
use clog::core::error::{ClogError, Result};
use clog::core::log_level::LogLevel;
use clog::core::sink::Sink;
use clog::sinks::{DailyFileSink, FileSink, WriterSink};
use clog::{info, Clog};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn captured(sink: &WriterSink<Vec<u8>>) -> String {
    String::from_utf8(sink.lock().clone()).expect("utf8 output")
}

/// Checks `YYYY-MM-DD HH:MM:SS.mmm`
fn assert_timestamp(ts: &str) {
    assert_eq!(ts.len(), 23, "unexpected timestamp {:?}", ts);
    for (idx, ch) in ts.char_indices() {
        match idx {
            4 | 7 => assert_eq!(ch, '-', "in {:?}", ts),
            10 => assert_eq!(ch, ' ', "in {:?}", ts),
            13 | 16 => assert_eq!(ch, ':', "in {:?}", ts),
            19 => assert_eq!(ch, '.', "in {:?}", ts),
            _ => assert!(ch.is_ascii_digit(), "in {:?}", ts),
        }
    }
}

#[test]
fn test_pi_record_layout() {
    let clog = Clog::new();
    let sink = Arc::new(WriterSink::new(Vec::new()));
    clog.add_output(sink.clone(), LogLevel::Trace);

    info!(clog, "Pi is {}", 3.14159);

    let output = captured(&sink);
    assert!(output.ends_with("Pi is 3.14159\n"), "got {:?}", output);

    let (timestamp, rest) = output.split_at(23);
    assert_timestamp(timestamp);
    assert_eq!(rest, " [Info ] Pi is 3.14159\n");
}

#[test]
fn test_stdout_style_fanout() {
    // One destination, two bindings: Warn and above, plus Debug..Info
    let clog = Clog::new();
    let sink = Arc::new(WriterSink::new(Vec::new()));
    clog.add_output(sink.clone(), LogLevel::Warn);
    clog.add_output_range(sink.clone(), LogLevel::Debug, LogLevel::Info);

    clog.trace("hidden");
    clog.debug("debug");
    clog.info("info");
    clog.warn("warn");
    clog.error("error");

    let output = captured(&sink);
    let messages: Vec<&str> = output
        .lines()
        .map(|line| line.split("] ").nth(1).expect("message"))
        .collect();
    assert_eq!(messages, vec!["debug", "info", "warn", "error"]);
}

#[test]
fn test_registration_order_is_delivery_order() {
    let shared = Arc::new(WriterSink::new(Vec::new()));

    struct Tagged {
        tag: &'static str,
        target: Arc<WriterSink<Vec<u8>>>,
    }

    impl Sink for Tagged {
        fn write(&self, buf: &[u8]) -> Result<usize> {
            self.target.write(self.tag.as_bytes())?;
            self.target.write(buf)
        }

        fn name(&self) -> &str {
            self.tag
        }
    }

    let clog = Clog::new();
    for tag in ["first:", "second:", "third:"] {
        clog.add_output(
            Arc::new(Tagged {
                tag,
                target: Arc::clone(&shared),
            }),
            LogLevel::Info,
        );
    }

    clog.info("ordered");

    let output = captured(&shared);
    let first = output.find("first:").expect("first");
    let second = output.find("second:").expect("second");
    let third = output.find("third:").expect("third");
    assert!(first < second && second < third);
}

#[test]
fn test_file_sink_through_dispatcher() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let clog = Clog::new();
    let file = Arc::new(FileSink::new(&log_file));
    clog.add_output(file.clone(), LogLevel::Warn);

    clog.info("below threshold");
    assert!(!file.is_open(), "nothing admitted yet, file must stay closed");
    assert!(!log_file.exists());

    clog.warn("first warning");
    clog.error("first error");
    assert!(file.is_open());

    file.close();
    file.close();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("[Warn ] first warning"));
    assert!(lines[1].ends_with("[Error] first error"));
}

#[test]
fn test_file_sink_heals_after_directory_appears() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = temp_dir.path().join("logs");
    let log_file = log_dir.join("app.log");

    let clog = Clog::new();
    let file = Arc::new(FileSink::new(&log_file));
    let healthy = Arc::new(WriterSink::new(Vec::new()));
    clog.add_output(file.clone(), LogLevel::Info);
    clog.add_output(healthy.clone(), LogLevel::Info);

    clog.info("lost to the file, kept in memory");
    assert!(!file.is_open());
    assert_eq!(clog.metrics().write_failures(), 1);

    fs::create_dir(&log_dir).expect("Failed to create log dir");
    clog.info("now the file works");
    assert!(file.is_open());

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("now the file works"));
    assert_eq!(captured(&healthy).lines().count(), 2);
}

#[test]
fn test_one_file_shared_by_two_dispatchers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("shared.log");
    let file = Arc::new(FileSink::new(&log_file));

    let audit = Clog::new();
    let app = Clog::new();
    audit.add_output(file.clone(), LogLevel::Trace);
    app.add_output(file.clone(), LogLevel::Error);

    audit.info("audit entry");
    app.info("filtered");
    app.error("app failure");
    drop(audit);
    drop(app);

    // Dispatchers never close the sink on the caller's behalf
    assert!(file.is_open());

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_daily_file_sink_through_dispatcher() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let template = temp_dir.path().join("myprocess_{date}.log");

    let clog = Clog::new();
    let daily = Arc::new(
        DailyFileSink::new(template.to_string_lossy()).expect("valid template"),
    );
    clog.add_output(daily.clone(), LogLevel::Trace);

    clog.trace("daily entry");

    let path = daily.current_path().expect("file opened");
    assert!(path.starts_with(temp_dir.path()));
    let content = fs::read_to_string(path).expect("Failed to read daily file");
    assert!(content.ends_with("[Trace] daily entry\n"));
}

#[test]
fn test_error_tracking() {
    struct FailingSink {
        attempts: AtomicUsize,
    }

    impl Sink for FailingSink {
        fn write(&self, _buf: &[u8]) -> Result<usize> {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            Err(ClogError::other("Simulated failure"))
        }

        fn name(&self) -> &str {
            "FailingSink"
        }
    }

    let failing = Arc::new(FailingSink {
        attempts: AtomicUsize::new(0),
    });
    let reported = Arc::new(AtomicUsize::new(0));
    let reported_clone = Arc::clone(&reported);

    let clog = Clog::builder()
        .output(failing.clone(), LogLevel::Trace)
        .on_sink_error(Arc::new(move |name, err| {
            assert_eq!(name, "FailingSink");
            assert_eq!(err.to_string(), "Simulated failure");
            reported_clone.fetch_add(1, Ordering::Relaxed);
        }))
        .build();

    for _ in 0..5 {
        clog.info("Test message");
    }

    assert_eq!(failing.attempts.load(Ordering::Relaxed), 5);
    assert_eq!(reported.load(Ordering::Relaxed), 5);
    assert_eq!(clog.metrics().write_failures(), 5);
    assert_eq!(clog.metrics().records_logged(), 5);
}

#[test]
fn test_config_wires_file_outputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let warn_file = temp_dir.path().join("warn.log");
    let all_file = temp_dir.path().join("all.log");

    let json = serde_json::json!({
        "outputs": [
            { "target": { "type": "file", "path": warn_file }, "min_level": "Warning" },
            { "target": { "type": "file", "path": all_file }, "min_level": "Trace" }
        ]
    })
    .to_string();

    let clog = ClogConfig::from_json_str(&json)
        .and_then(|config| config.build())
        .expect("valid config");

    clog.debug("debug");
    clog.warn("warn");
    drop(clog);

    assert_eq!(fs::read_to_string(&warn_file).unwrap().lines().count(), 1);
    assert_eq!(fs::read_to_string(&all_file).unwrap().lines().count(), 2);
}
