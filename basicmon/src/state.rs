//! Dashboard state: latest sample of each kind plus process-table sort settings.
//! Only the event loop mutates it, so it carries no locks.

use std::cmp::Ordering;

use basicmon_sampler::{CpuSample, DiskSample, MemSample, NetSample, ProcessEntry, ProcessTable};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Pid,
    Name,
    Cpu,
    Mem,
}

impl SortKey {
    /// Identifiers read naturally low to high, resource usage high to low.
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Pid | SortKey::Name => SortDirection::Ascending,
            SortKey::Cpu | SortKey::Mem => SortDirection::Descending,
        }
    }

    fn compare(self, a: &ProcessEntry, b: &ProcessEntry) -> Ordering {
        match self {
            SortKey::Pid => a.pid.cmp(&b.pid),
            SortKey::Name => a.name.cmp(&b.name),
            // total order, NaN sorts above every number
            SortKey::Cpu => a.cpu_percent.total_cmp(&b.cpu_percent),
            SortKey::Mem => a.memory_bytes.cmp(&b.memory_bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub cpu: CpuSample,
    pub memory: MemSample,
    pub disk: DiskSample,
    pub network: NetSample,
    pub processes: ProcessTable,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub last_refresh: DateTime<Local>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl DashboardState {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            cpu: CpuSample::default(),
            memory: MemSample::default(),
            disk: DiskSample::default(),
            network: NetSample::default(),
            processes: Vec::new(),
            sort_key: SortKey::Cpu,
            sort_direction: SortKey::Cpu.default_direction(),
            last_refresh: now,
        }
    }

    pub fn apply_cpu(&mut self, s: CpuSample) {
        self.cpu = s;
    }

    pub fn apply_memory(&mut self, s: MemSample) {
        self.memory = s;
    }

    pub fn apply_disk(&mut self, s: DiskSample) {
        self.disk = s;
    }

    pub fn apply_network(&mut self, s: NetSample) {
        self.network = s;
    }

    pub fn apply_processes(&mut self, table: ProcessTable) {
        self.processes = table;
        self.sort_processes();
    }

    /// Select `key`. Re-selecting the current key flips the direction when
    /// `toggle_if_same` is set; a new key starts at its default direction.
    pub fn set_sort(&mut self, key: SortKey, toggle_if_same: bool) {
        if key == self.sort_key {
            if toggle_if_same {
                self.sort_direction = self.sort_direction.flipped();
            }
        } else {
            self.sort_key = key;
            self.sort_direction = key.default_direction();
        }
        self.sort_processes();
    }

    pub fn mark_refreshed(&mut self, now: DateTime<Local>) {
        self.last_refresh = now;
    }

    // Stable: entries with equal keys keep their previous relative order.
    fn sort_processes(&mut self) {
        let key = self.sort_key;
        match self.sort_direction {
            SortDirection::Ascending => self.processes.sort_by(|a, b| key.compare(a, b)),
            SortDirection::Descending => self.processes.sort_by(|a, b| key.compare(b, a)),
        }
    }
}
