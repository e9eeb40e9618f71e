//! Sample types published by the samplers.
//! Every type has a zero value (`Default`) that stands in for a failed query.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuSample {
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemSample {
    pub total: u64,
    pub used: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskSample {
    pub path: String,
    pub total: u64,
    pub used: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetSample {
    // bytes per second, never negative
    pub sent_rate: f64,
    pub recv_rate: f64,
    // cumulative counters as reported by the OS
    pub total_sent: u64,
    pub total_recv: u64,
    /// Set when the requested interface does not exist, so the UI can tell it apart from idle.
    pub missing_interface: Option<String>,
}

impl NetSample {
    pub fn interface_missing(name: &str) -> Self {
        Self {
            missing_interface: Some(name.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_bytes: u64,
}

/// Snapshot of running processes, replaced wholesale on every tick.
pub type ProcessTable = Vec<ProcessEntry>;

/// Cumulative byte counters for one interface (or the sum of all of them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub sent: u64,
    pub recv: u64,
}
