//! Metrics collection using sysinfo. Each probe owns its own sysinfo handle so samplers
//! never contend for one.

use std::path::{Path, PathBuf};

use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind, ProcessesToUpdate,
    RefreshKind, System,
};

use crate::error::ProbeError;
use crate::network::CounterSource;
use crate::process::{ProcessReading, ProcessSource};
use crate::sampler::Probe;
use crate::types::{CpuSample, DiskSample, MemSample, NetCounters};

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Global CPU usage since the previous refresh; the tick interval is the window.
pub struct CpuProbe {
    sys: System,
}

impl CpuProbe {
    pub fn new() -> Self {
        let kind = RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage());
        let mut sys = System::new_with_specifics(kind);
        // baseline for the first delta
        sys.refresh_cpu_usage();
        Self { sys }
    }
}

impl Default for CpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for CpuProbe {
    type Output = CpuSample;

    fn probe(&mut self) -> Result<CpuSample, ProbeError> {
        self.sys.refresh_cpu_usage();
        if self.sys.cpus().is_empty() {
            return Err(ProbeError::Unsupported("cpu usage"));
        }
        let percent = f64::from(self.sys.global_cpu_usage());
        if !percent.is_finite() {
            return Err(ProbeError::Source(format!("cpu usage is {percent}")));
        }
        Ok(CpuSample {
            percent: percent.clamp(0.0, 100.0),
        })
    }
}

pub struct MemoryProbe {
    sys: System,
}

impl MemoryProbe {
    pub fn new() -> Self {
        let kind = RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());
        Self {
            sys: System::new_with_specifics(kind),
        }
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for MemoryProbe {
    type Output = MemSample;

    fn probe(&mut self) -> Result<MemSample, ProbeError> {
        self.sys.refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(ProbeError::Unsupported("memory totals"));
        }
        // "used" means not available to new allocations, matching what top shows
        let used = total.saturating_sub(self.sys.available_memory());
        Ok(MemSample {
            total,
            used,
            used_percent: percent(used, total),
        })
    }
}

/// Usage of the filesystem holding one path, fixed at construction.
pub struct DiskProbe {
    path: PathBuf,
    disks: Disks,
}

impl DiskProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Probe for DiskProbe {
    type Output = DiskSample;

    fn probe(&mut self) -> Result<DiskSample, ProbeError> {
        self.disks.refresh(true);
        let resolved = std::fs::canonicalize(&self.path)
            .map_err(|_| ProbeError::PathNotMounted(self.path.clone()))?;
        let disk = containing_mount(&self.disks, &resolved)
            .ok_or_else(|| ProbeError::PathNotMounted(self.path.clone()))?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        Ok(DiskSample {
            path: self.path.display().to_string(),
            total,
            used,
            used_percent: percent(used, total),
        })
    }
}

// Longest mount point that is a prefix of `path`.
fn containing_mount<'a>(disks: &'a Disks, path: &Path) -> Option<&'a sysinfo::Disk> {
    disks
        .list()
        .iter()
        .filter(|d| path.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
}

/// Cumulative counters for one named interface, or the sum of all of them.
pub struct SysNetCounters {
    nets: Networks,
    interface: Option<String>,
}

impl SysNetCounters {
    pub fn new(interface: Option<String>) -> Self {
        Self {
            nets: Networks::new_with_refreshed_list(),
            interface,
        }
    }
}

impl CounterSource for SysNetCounters {
    fn counters(&mut self) -> Result<NetCounters, ProbeError> {
        self.nets.refresh(true);
        match self.interface.as_deref() {
            Some(wanted) => self
                .nets
                .iter()
                .find(|(name, _)| name.as_str() == wanted)
                .map(|(_, data)| NetCounters {
                    sent: data.total_transmitted(),
                    recv: data.total_received(),
                })
                .ok_or_else(|| ProbeError::InterfaceNotFound(wanted.to_string())),
            None => Ok(self
                .nets
                .iter()
                .fold(NetCounters::default(), |acc, (_, data)| NetCounters {
                    sent: acc.sent.saturating_add(data.total_transmitted()),
                    recv: acc.recv.saturating_add(data.total_received()),
                })),
        }
    }
}

pub struct SysProcesses {
    sys: System,
}

impl SysProcesses {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for SysProcesses {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysProcesses {
    fn readings(&mut self) -> Result<Vec<ProcessReading>, ProbeError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .without_tasks(),
        );
        if self.sys.processes().is_empty() {
            return Err(ProbeError::Unsupported("process list"));
        }

        let readings = self
            .sys
            .processes()
            .values()
            .map(|p| {
                let name = p.name().to_string_lossy().into_owned();
                let cpu = f64::from(p.cpu_usage());
                ProcessReading {
                    pid: p.pid().as_u32(),
                    name: (!name.is_empty()).then_some(name),
                    cpu_percent: cpu.is_finite().then_some(cpu),
                    memory_bytes: Some(p.memory()),
                }
            })
            .collect();
        Ok(readings)
    }
}
