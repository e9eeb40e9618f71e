//! Background samplers: one task per metric kind, each owning its probe and handing
//! samples to the dashboard one at a time until the shared cancellation token fires.

use std::path::PathBuf;

use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ProbeError;
use crate::feed::{handoff, Feed};
use crate::lifecycle::Lifecycle;
use crate::metrics::{CpuProbe, DiskProbe, MemoryProbe, SysNetCounters, SysProcesses};
use crate::network::NetworkProbe;
use crate::process::ProcessProbe;
use crate::types::{CpuSample, DiskSample, MemSample, NetSample, ProcessTable};

/// One fallible query against the metrics source.
pub trait Probe: Send + 'static {
    type Output: Default + Send + 'static;

    fn probe(&mut self) -> Result<Self::Output, ProbeError>;
}

impl<F, T> Probe for F
where
    F: FnMut() -> Result<T, ProbeError> + Send + 'static,
    T: Default + Send + 'static,
{
    type Output = T;

    fn probe(&mut self) -> Result<T, ProbeError> {
        self()
    }
}

/// Spawn a sampler task. The returned feed closes once the task has stopped.
///
/// Each tick the probe is queried once; a failed query publishes `Default::default()`.
/// The handoff waits until the feed has taken the sample, so a slow consumer delays the
/// sampler instead of losing or staling samples. Cancellation is observed at every wait
/// point.
pub fn spawn_sampler<P: Probe>(
    kind: &'static str,
    mut probe: P,
    period: Duration,
    cancel: CancellationToken,
) -> (Feed<P::Output>, JoinHandle<()>) {
    let (tx, rx) = handoff();
    let handle = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut failing = false;

        loop {
            // first tick completes immediately
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let sample = match probe.probe() {
                Ok(v) => {
                    if failing {
                        info!(kind, "sampler recovered");
                        failing = false;
                    }
                    v
                }
                Err(e) => {
                    if failing {
                        debug!(kind, error = %e, "sample still failing");
                    } else {
                        warn!(kind, error = %e, "sample failed, publishing zero value");
                        failing = true;
                    }
                    P::Output::default()
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                sent = tx.publish(sample) => {
                    if sent.is_err() {
                        debug!(kind, "receiver dropped");
                        break;
                    }
                }
            }
        }
        debug!(kind, "sampler stopped");
    });
    (rx, handle)
}

/// Parameters for the five standard samplers.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub interval: Duration,
    pub disk_interval: Duration,
    pub process_interval: Duration,
    pub disk_path: PathBuf,
    /// `None` sums the counters of every interface.
    pub interface: Option<String>,
}

impl SamplerConfig {
    /// Disk usage changes slowly, so it is ticked at twice the base interval.
    pub fn new(interval: Duration, disk_path: impl Into<PathBuf>) -> Self {
        Self {
            interval,
            disk_interval: interval * 2,
            process_interval: interval,
            disk_path: disk_path.into(),
            interface: None,
        }
    }
}

/// Receiving ends of every sampler, one per metric kind.
pub struct Feeds {
    pub cpu: Feed<CpuSample>,
    pub memory: Feed<MemSample>,
    pub disk: Feed<DiskSample>,
    pub network: Feed<NetSample>,
    pub processes: Feed<ProcessTable>,
}

/// Start the sysinfo-backed samplers. Their tasks are tracked by `lifecycle` and share
/// its cancellation token.
pub fn spawn_all(cfg: &SamplerConfig, lifecycle: &mut Lifecycle) -> Feeds {
    let (cpu, h) = spawn_sampler("cpu", CpuProbe::new(), cfg.interval, lifecycle.token());
    lifecycle.track(h);

    let (memory, h) = spawn_sampler("memory", MemoryProbe::new(), cfg.interval, lifecycle.token());
    lifecycle.track(h);

    let (disk, h) = spawn_sampler(
        "disk",
        DiskProbe::new(cfg.disk_path.clone()),
        cfg.disk_interval,
        lifecycle.token(),
    );
    lifecycle.track(h);

    let counters = SysNetCounters::new(cfg.interface.clone());
    let (network, h) = spawn_sampler(
        "network",
        NetworkProbe::new(counters, cfg.interval),
        cfg.interval,
        lifecycle.token(),
    );
    lifecycle.track(h);

    let (processes, h) = spawn_sampler(
        "processes",
        ProcessProbe::new(SysProcesses::new()),
        cfg.process_interval,
        lifecycle.token(),
    );
    lifecycle.track(h);

    info!(
        interval = ?cfg.interval,
        disk_path = %cfg.disk_path.display(),
        interface = cfg.interface.as_deref().unwrap_or("all"),
        "samplers started"
    );

    Feeds {
        cpu,
        memory,
        disk,
        network,
        processes,
    }
}
