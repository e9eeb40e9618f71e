//! Sampling core for basicmon: periodic probes of CPU, memory, disk, network and
//! processes, each running as its own task and handing samples over one at a time.

pub mod error;
pub mod feed;
pub mod lifecycle;
pub mod metrics;
pub mod network;
pub mod process;
pub mod rate;
pub mod sampler;
pub mod types;

pub use error::{FeedClosed, ProbeError};
pub use feed::{handoff, Feed, Publisher};
pub use lifecycle::{Lifecycle, SHUTDOWN_GRACE};
pub use sampler::{spawn_all, spawn_sampler, Feeds, Probe, SamplerConfig};
pub use types::{
    CpuSample, DiskSample, MemSample, NetCounters, NetSample, ProcessEntry, ProcessTable,
};
