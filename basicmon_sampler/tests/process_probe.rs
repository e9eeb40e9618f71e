//! Process probe drops entries the source could not fully read.

use basicmon_sampler::process::{ProcessProbe, ProcessReading, ProcessSource};
use basicmon_sampler::{ProbeError, Probe, ProcessEntry};

struct Fixed(Result<Vec<ProcessReading>, String>);

impl ProcessSource for Fixed {
    fn readings(&mut self) -> Result<Vec<ProcessReading>, ProbeError> {
        self.0.clone().map_err(ProbeError::Source)
    }
}

fn full(pid: u32, name: &str, cpu: f64, mem: u64) -> ProcessReading {
    ProcessReading {
        pid,
        name: Some(name.into()),
        cpu_percent: Some(cpu),
        memory_bytes: Some(mem),
    }
}

#[test]
fn incomplete_readings_are_skipped() {
    let readings = vec![
        full(1, "init", 0.1, 4_000),
        ProcessReading {
            name: None,
            ..full(2, "", 1.0, 1)
        },
        ProcessReading {
            cpu_percent: None,
            ..full(3, "zombie", 0.0, 0)
        },
        ProcessReading {
            memory_bytes: None,
            ..full(4, "gone", 0.0, 0)
        },
        full(5, "shell", 2.5, 9_000),
    ];
    let mut probe = ProcessProbe::new(Fixed(Ok(readings)));
    let table = probe.probe().expect("table");

    assert_eq!(
        table,
        vec![
            ProcessEntry {
                pid: 1,
                name: "init".into(),
                cpu_percent: 0.1,
                memory_bytes: 4_000,
            },
            ProcessEntry {
                pid: 5,
                name: "shell".into(),
                cpu_percent: 2.5,
                memory_bytes: 9_000,
            },
        ]
    );
}

#[test]
fn listing_failure_is_an_error() {
    let mut probe = ProcessProbe::new(Fixed(Err("permission denied".into())));
    assert!(probe.probe().is_err());
}
