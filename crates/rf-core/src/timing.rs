//! Lightweight performance timing utilities.
//!
//! Per-point property evaluation runs at every mesh point on every outer
//! iteration, so the timers here are off unless enabled programmatically or
//! through the `RF_TIMING` environment variable.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// `RF_TIMING` as seen on first use; later changes to the environment are ignored.
static ENV_ENABLED: OnceLock<bool> = OnceLock::new();

fn env_enabled() -> bool {
    *ENV_ENABLED.get_or_init(|| std::env::var_os("RF_TIMING").is_some())
}

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable performance timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || env_enabled()
}

/// A simple timer that records into an [`AccumulatingTimer`] when dropped.
pub struct Timer {
    sink: &'static AccumulatingTimer,
    start: Option<Instant>,
}

impl Timer {
    /// Start timing into `sink`. Does nothing if timing is disabled.
    pub fn start(sink: &'static AccumulatingTimer) -> Self {
        Self {
            sink,
            start: is_enabled().then(Instant::now),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            self.sink.record(start.elapsed().as_secs_f64());
        }
    }
}

/// Accumulating timer for tracking total time across multiple calls.
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for AccumulatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatingTimer {
    /// Create a new accumulating timer.
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Record a timing measurement.
    pub fn record(&self, duration_s: f64) {
        let nanos = (duration_s * 1e9) as u64;
        self.total_ns.fetch_add(nanos, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total time spent (in seconds).
    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    /// Get number of calls.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Get average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        let count = self.count();
        if count > 0 {
            self.total_seconds() / count as f64
        } else {
            0.0
        }
    }

    /// Reset the timer.
    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Property-closure timers.
pub mod closure_timing {
    use super::AccumulatingTimer;

    /// Time spent in temperature-driven state sets (full closure)
    pub static SET_STATE: AccumulatingTimer = AccumulatingTimer::new();
    /// Time spent inverting enthalpy for temperature
    pub static TEMPERATURE_FROM_ENTHALPY: AccumulatingTimer = AccumulatingTimer::new();
    /// Time spent in source-term and heat-release evaluation
    pub static SOURCE_TERMS: AccumulatingTimer = AccumulatingTimer::new();

    /// Reset all closure timers.
    pub fn reset_all() {
        SET_STATE.reset();
        TEMPERATURE_FROM_ENTHALPY.reset();
        SOURCE_TERMS.reset();
    }

    /// Render a summary of the closure timers, one line per non-empty timer.
    pub fn summary() -> String {
        let mut out = String::new();
        for (label, timer) in [
            ("set_state", &SET_STATE),
            ("temperature_from_enthalpy", &TEMPERATURE_FROM_ENTHALPY),
            ("source_terms", &SOURCE_TERMS),
        ] {
            let count = timer.count();
            if count > 0 {
                out.push_str(&format!(
                    "{:<28} {} calls, {:.3}s total, {:.4}ms avg\n",
                    label,
                    count,
                    timer.total_seconds(),
                    timer.average_seconds() * 1000.0
                ));
            }
        }
        out
    }
}
