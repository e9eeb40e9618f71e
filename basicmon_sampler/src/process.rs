//! Process table probe. Entries the source could not fully read are left out.

use crate::error::ProbeError;
use crate::sampler::Probe;
use crate::types::{ProcessEntry, ProcessTable};

/// One process as seen by the source; any field may be unreadable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessReading {
    pub pid: u32,
    pub name: Option<String>,
    pub cpu_percent: Option<f64>,
    pub memory_bytes: Option<u64>,
}

pub trait ProcessSource: Send + 'static {
    fn readings(&mut self) -> Result<Vec<ProcessReading>, ProbeError>;
}

pub struct ProcessProbe<S> {
    source: S,
}

impl<S: ProcessSource> ProcessProbe<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: ProcessSource> Probe for ProcessProbe<S> {
    type Output = ProcessTable;

    fn probe(&mut self) -> Result<ProcessTable, ProbeError> {
        let table = self
            .source
            .readings()?
            .into_iter()
            .filter_map(|r| {
                Some(ProcessEntry {
                    pid: r.pid,
                    name: r.name?,
                    cpu_percent: r.cpu_percent?,
                    memory_bytes: r.memory_bytes?,
                })
            })
            .collect();
        Ok(table)
    }
}
