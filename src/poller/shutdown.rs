//! Wake-ups for the polling thread between ticks

use std::mem;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// Why [`ShutdownSignal::wait`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The full pause elapsed
    Elapsed,
    /// Someone asked for an early tick, e.g. after a map change
    Nudged,
    /// Stop polling
    Shutdown,
}

#[derive(Debug, Default)]
struct SignalState {
    shutdown: bool,
    nudged: bool,
}

/// Interruptible pause between ticks.
///
/// Shutdown is sticky; a nudge wakes exactly one wait.
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    state: Mutex<SignalState>,
    condvar: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SignalState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Stop the poller, waking it if it is paused
    pub fn trigger(&self) {
        self.lock().shutdown = true;
        self.condvar.notify_all();
    }

    /// Cut the current pause short, or the next one if none is running
    pub fn nudge(&self) {
        self.lock().nudged = true;
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    /// Pause for `duration` unless shut down or nudged first
    pub fn wait(&self, duration: Duration) -> Wake {
        let guard = self.lock();
        let (mut state, _) = self
            .condvar
            .wait_timeout_while(guard, duration, |s| !s.shutdown && !s.nudged)
            .unwrap_or_else(|e| e.into_inner());

        if state.shutdown {
            Wake::Shutdown
        } else if mem::take(&mut state.nudged) {
            Wake::Nudged
        } else {
            Wake::Elapsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_full_pause_elapses() {
        let signal = ShutdownSignal::new();
        let start = Instant::now();

        assert_eq!(signal.wait(Duration::from_millis(50)), Wake::Elapsed);
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(!signal.is_shutdown());
    }

    #[test]
    fn test_trigger_wakes_waiter() {
        let signal = Arc::new(ShutdownSignal::new());
        let waiter = Arc::clone(&signal);

        let handle = thread::spawn(move || {
            let start = Instant::now();
            (waiter.wait(Duration::from_secs(10)), start.elapsed())
        });

        thread::sleep(Duration::from_millis(50));
        signal.trigger();

        let (wake, elapsed) = handle.join().unwrap();
        assert_eq!(wake, Wake::Shutdown);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_shutdown_is_sticky() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.nudge();

        let start = Instant::now();
        assert_eq!(signal.wait(Duration::from_secs(10)), Wake::Shutdown);
        assert_eq!(signal.wait(Duration::from_secs(10)), Wake::Shutdown);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_nudge_wakes_once() {
        let signal = ShutdownSignal::new();
        signal.nudge();

        let start = Instant::now();
        assert_eq!(signal.wait(Duration::from_secs(10)), Wake::Nudged);
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(signal.wait(Duration::from_millis(20)), Wake::Elapsed);
    }
}
