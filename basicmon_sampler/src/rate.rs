//! Per-second byte rates from cumulative interface counters.

use std::time::Duration;

use crate::types::NetCounters;

/// Remembers the previous counter reading and turns the next one into rates.
#[derive(Debug, Clone, Default)]
pub struct RateCalculator {
    previous: NetCounters,
}

impl RateCalculator {
    /// `initial` is a reading that is never reported; it only sets the baseline.
    pub fn new(initial: NetCounters) -> Self {
        Self { previous: initial }
    }

    /// Returns `(sent_rate, recv_rate)` in bytes per second over `elapsed`, then moves the
    /// baseline to `current`.
    pub fn advance(&mut self, current: NetCounters, elapsed: Duration) -> (f64, f64) {
        let secs = elapsed.as_secs_f64();
        let sent = per_second(self.previous.sent, current.sent, secs);
        let recv = per_second(self.previous.recv, current.recv, secs);
        self.previous = current;
        (sent, recv)
    }

    pub fn previous(&self) -> NetCounters {
        self.previous
    }
}

// A zero baseline has nothing to diff against; a counter that went backwards
// (interface reset, wrap) resyncs at 0 instead of going negative.
fn per_second(previous: u64, current: u64, secs: f64) -> f64 {
    if previous == 0 || current < previous || secs <= 0.0 {
        return 0.0;
    }
    (current - previous) as f64 / secs
}
