//! Signal handling and shutdown ordering (spec §5).
//!
//! SIGINT -> exit 130, SIGTERM -> exit 143, SIGHUP treated as SIGTERM,
//! SIGPIPE ignored (piped CLI usage). Cleanup runs in a fixed order:
//! flush pending version-store writes, close the catalog store, release
//! file handles. Mirrors the teacher's flock-based resource teardown in
//! spirit, generalized into an ordered list of closures.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ExitCode;

/// Cheap, clonable cancellation flag propagated from signal handlers
/// into the retry loop and any long-running local mutation.
#[derive(Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// A single ordered cleanup step, labeled for diagnostics.
pub struct CleanupStep {
    pub label: &'static str,
    pub run: Box<dyn FnOnce() + Send>,
}

/// Ordered cleanup registry. Steps run in registration order and the
/// whole sequence is bounded by `budget` (default 5s); if exceeded the
/// caller should force-exit 1 rather than hang.
#[derive(Default)]
pub struct CleanupRegistry {
    steps: Vec<CleanupStep>,
    budget: Duration,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            budget: Duration::from_secs(5),
        }
    }

    pub fn with_budget(budget: Duration) -> Self {
        Self {
            steps: Vec::new(),
            budget,
        }
    }

    pub fn register(&mut self, label: &'static str, run: impl FnOnce() + Send + 'static) {
        self.steps.push(CleanupStep {
            label,
            run: Box::new(run),
        });
    }

    /// Runs all steps in order; returns `false` if the budget was
    /// exceeded (callers should force-exit 1 in that case).
    pub fn run(self) -> bool {
        let start = std::time::Instant::now();
        for step in self.steps {
            tracing::debug!(step = step.label, "running cleanup step");
            (step.run)();
            if start.elapsed() > self.budget {
                tracing::warn!("cleanup budget exceeded at step {}", step.label);
                return false;
            }
        }
        true
    }
}

/// Maps a received signal to its process exit code per spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceivedSignal {
    Interrupt,
    Terminate,
    Hangup,
}

impl ReceivedSignal {
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::Interrupt => ExitCode::Interrupted,
            // SIGHUP is treated as SIGTERM (spec §5).
            Self::Terminate | Self::Hangup => ExitCode::Terminated,
        }
    }
}

/// Installs SIGINT/SIGTERM/SIGHUP handlers that flip `token` and ignores
/// SIGPIPE so piping into `head`/`less` doesn't kill the process. Returns
/// immediately; handlers run on a background task.
#[cfg(unix)]
pub fn install_signal_handlers(token: CancellationToken) {
    use tokio::signal::unix::{signal, SignalKind};

    // SAFETY: ignoring SIGPIPE is a documented, side-effect-free libc call
    // with no preconditions; it only affects this process's disposition
    // table for writes to closed pipes.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_IGN);
    }

    tokio::spawn(async move {
        let mut sigint = signal(SignalKind::interrupt()).expect("install SIGINT handler");
        let mut sigterm = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        let mut sighup = signal(SignalKind::hangup()).expect("install SIGHUP handler");

        tokio::select! {
            _ = sigint.recv() => token.cancel(),
            _ = sigterm.recv() => token.cancel(),
            _ = sighup.recv() => token.cancel(),
        }
    });
}

#[cfg(not(unix))]
pub fn install_signal_handlers(_token: CancellationToken) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_token_starts_clear() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn cloned_token_shares_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn signal_exit_codes_match_spec() {
        assert_eq!(ReceivedSignal::Interrupt.exit_code(), ExitCode::Interrupted);
        assert_eq!(ReceivedSignal::Terminate.exit_code(), ExitCode::Terminated);
        assert_eq!(ReceivedSignal::Hangup.exit_code(), ExitCode::Terminated);
    }

    #[test]
    fn cleanup_runs_in_order() {
        use std::sync::Mutex;
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CleanupRegistry::new();
        let o1 = order.clone();
        registry.register("flush-versions", move || o1.lock().unwrap().push("flush-versions"));
        let o2 = order.clone();
        registry.register("close-catalog", move || o2.lock().unwrap().push("close-catalog"));
        assert!(registry.run());
        assert_eq!(*order.lock().unwrap(), vec!["flush-versions", "close-catalog"]);
    }

    #[test]
    fn cleanup_reports_budget_exceeded() {
        let mut registry = CleanupRegistry::with_budget(Duration::from_millis(0));
        registry.register("slow", || std::thread::sleep(Duration::from_millis(5)));
        registry.register("never-reached", || panic!("should not run once budget is blown"));
        assert!(!registry.run());
    }
}
