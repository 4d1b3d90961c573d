//! Process termination for fatal records

/// Exit status used when a fatal record terminates the process.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Halts the process after a fatal record has been delivered.
///
/// The dispatcher only calls this when its `exit_on_fatal` flag is set.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Ends the process with [`std::process::exit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}
