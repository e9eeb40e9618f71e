//! Network sampler probe: reads cumulative counters and reports rates.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::ProbeError;
use crate::rate::RateCalculator;
use crate::sampler::Probe;
use crate::types::{NetCounters, NetSample};

/// Source of cumulative byte counters.
pub trait CounterSource: Send + 'static {
    fn counters(&mut self) -> Result<NetCounters, ProbeError>;
}

pub struct NetworkProbe<C> {
    source: C,
    rates: RateCalculator,
    interval: Duration,
    // ticks since the last successful read, including the current one
    pending_ticks: u32,
    missing: bool,
}

impl<C: CounterSource> NetworkProbe<C> {
    /// Takes one unpublished reading right away so the first published sample already
    /// has a baseline to diff against.
    pub fn new(mut source: C, interval: Duration) -> Self {
        let initial = source.counters().unwrap_or_default();
        Self {
            source,
            rates: RateCalculator::new(initial),
            interval,
            pending_ticks: 0,
            missing: false,
        }
    }
}

impl<C: CounterSource> Probe for NetworkProbe<C> {
    type Output = NetSample;

    fn probe(&mut self) -> Result<NetSample, ProbeError> {
        self.pending_ticks = self.pending_ticks.saturating_add(1);
        let current = match self.source.counters() {
            Ok(c) => c,
            Err(ProbeError::InterfaceNotFound(name)) => {
                if !self.missing {
                    warn!(interface = %name, "network interface not found");
                    self.missing = true;
                }
                return Ok(NetSample::interface_missing(&name));
            }
            // baseline stays put so the next success spans the whole outage
            Err(e) => return Err(e),
        };
        if self.missing {
            info!("network interface is back");
            self.missing = false;
        }

        let elapsed = self.interval * self.pending_ticks;
        self.pending_ticks = 0;
        let (sent_rate, recv_rate) = self.rates.advance(current, elapsed);
        Ok(NetSample {
            sent_rate,
            recv_rate,
            total_sent: current.sent,
            total_recv: current.recv,
            missing_interface: None,
        })
    }
}
