use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Instant;

#[derive(Debug, Default)]
struct TimerState {
    starts: HashMap<String, Instant>,
    durations: HashMap<String, u128>,
}

/// Process-wide named stopwatches, safe to use from worker threads.
pub struct Timer;

impl Timer {
    fn state() -> MutexGuard<'static, TimerState> {
        static INSTANCE: OnceLock<Mutex<TimerState>> = OnceLock::new();
        let lock = INSTANCE.get_or_init(|| Mutex::new(TimerState::default()));
        lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn start(label: &str) {
        Self::state()
            .starts
            .insert(label.to_string(), Instant::now());
    }

    /// Stop `label` and return the elapsed nanoseconds (0 if never started).
    pub fn stop(label: &str) -> u128 {
        let mut state = Self::state();
        let elapsed = state
            .starts
            .remove(label)
            .map(|start| start.elapsed().as_nanos())
            .unwrap_or(0);
        state.durations.insert(label.to_string(), elapsed);
        elapsed
    }

    /// Last recorded duration of `label` in nanoseconds.
    pub fn elapsed(label: &str) -> Option<u128> {
        Self::state().durations.get(label).copied()
    }
}
