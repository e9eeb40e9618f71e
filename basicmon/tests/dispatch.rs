//! Fan-in dispatcher: end-to-end delivery, cancellation and the single-writer
//! invariant under concurrent publishing.

use std::time::Duration;

use basicmon::dispatch::{apply, key_command, Action, Command, Dispatcher, Event};
use basicmon::state::{DashboardState, SortDirection, SortKey};
use basicmon_sampler::{
    handoff, spawn_sampler, CpuSample, DiskSample, Feeds, Lifecycle, MemSample, NetSample,
    ProbeError, ProcessEntry, ProcessTable, Publisher,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::stream::{self, Stream};
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn no_input() -> impl Stream<Item = Command> + Unpin {
    stream::pending()
}

fn commands(rx: mpsc::Receiver<Command>) -> impl Stream<Item = Command> + Unpin {
    Box::pin(stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|c| (c, rx))
    }))
}

struct Senders {
    cpu: Publisher<CpuSample>,
    memory: Publisher<MemSample>,
    disk: Publisher<DiskSample>,
    network: Publisher<NetSample>,
    processes: Publisher<ProcessTable>,
}

fn manual_feeds() -> (Senders, Feeds) {
    let (cpu_tx, cpu) = handoff();
    let (mem_tx, memory) = handoff();
    let (disk_tx, disk) = handoff();
    let (net_tx, network) = handoff();
    let (proc_tx, processes) = handoff();
    (
        Senders {
            cpu: cpu_tx,
            memory: mem_tx,
            disk: disk_tx,
            network: net_tx,
            processes: proc_tx,
        },
        Feeds {
            cpu,
            memory,
            disk,
            network,
            processes,
        },
    )
}

// A publish only completes once the dispatcher takes the value, so it runs beside the loop.
fn publish_later<T: Send + 'static>(tx: &Publisher<T>, value: T) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let _ = tx.publish(value).await;
    });
}

fn table(n: u32) -> ProcessTable {
    (1..=n)
        .map(|pid| ProcessEntry {
            pid,
            name: format!("proc-{pid:02}"),
            cpu_percent: f64::from(pid % 7),
            memory_bytes: u64::from(pid) * 1_000,
        })
        .collect()
}

#[tokio::test]
async fn published_sample_reaches_state() {
    let (tx, feeds) = manual_feeds();
    let mut lifecycle = Lifecycle::new();
    let mut d = Dispatcher::new(feeds, Duration::from_secs(3600), no_input(), lifecycle.token());
    let mut state = DashboardState::default();

    publish_later(&tx.cpu, CpuSample { percent: 42.5 });
    loop {
        let ev = timeout(WAIT, d.next()).await.expect("no event").expect("cancelled");
        if let Event::Cpu(_) = ev {
            assert_eq!(apply(&mut state, ev), Action::Continue);
            break;
        }
        apply(&mut state, ev);
    }
    assert_eq!(state.cpu.percent, 42.5);

    let disk = DiskSample {
        path: "/".into(),
        total: 1_000_000_000,
        used: 500_000_000,
        used_percent: 50.0,
    };
    publish_later(&tx.disk, disk.clone());
    publish_later(&tx.processes, table(15));
    while state.disk != disk || state.processes.len() != 15 {
        let ev = timeout(WAIT, d.next()).await.expect("no event").expect("cancelled");
        apply(&mut state, ev);
    }
    assert_eq!(state.disk.used_percent, 50.0);

    lifecycle.token().cancel();
    assert!(d.next().await.is_none());
    drop(lifecycle);
}

#[tokio::test]
async fn nothing_is_delivered_after_cancellation() {
    let (tx, feeds) = manual_feeds();
    let lifecycle = Lifecycle::new();
    let mut d = Dispatcher::new(feeds, Duration::from_secs(3600), no_input(), lifecycle.token());

    // consume the immediate first redraw tick
    assert_eq!(d.next().await, Some(Event::Redraw));

    // values are already queued when the token fires
    publish_later(&tx.cpu, CpuSample { percent: 99.0 });
    publish_later(&tx.memory, MemSample::default());
    tokio::time::sleep(Duration::from_millis(20)).await;
    lifecycle.token().cancel();

    for _ in 0..3 {
        assert_eq!(d.next().await, None);
    }
    assert!(lifecycle.shutdown(WAIT).await);
}

#[tokio::test]
async fn closed_feeds_do_not_end_the_loop() {
    let (tx, feeds) = manual_feeds();
    drop(tx);
    let lifecycle = Lifecycle::new();
    let mut d = Dispatcher::new(feeds, Duration::from_millis(5), no_input(), lifecycle.token());

    for _ in 0..3 {
        let ev = timeout(WAIT, d.next()).await.expect("loop stalled");
        assert_eq!(ev, Some(Event::Redraw));
    }
}

#[tokio::test]
async fn redraw_and_commands_route_to_actions() {
    let mut state = DashboardState::default();
    let before = state.last_refresh;
    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(apply(&mut state, Event::Redraw), Action::Draw);
    assert!(state.last_refresh > before);

    assert_eq!(
        apply(&mut state, Event::Command(Command::Sort(SortKey::Cpu))),
        Action::Draw
    );
    assert_eq!(state.sort_direction, SortDirection::Ascending);
    assert_eq!(apply(&mut state, Event::Command(Command::Quit)), Action::Quit);
}

#[test]
fn keys_map_to_commands() {
    let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
    assert_eq!(key_command(key(KeyCode::Char('c'))), Some(Command::Sort(SortKey::Cpu)));
    assert_eq!(key_command(key(KeyCode::Char('m'))), Some(Command::Sort(SortKey::Mem)));
    assert_eq!(key_command(key(KeyCode::Char('p'))), Some(Command::Sort(SortKey::Pid)));
    assert_eq!(key_command(key(KeyCode::Char('n'))), Some(Command::Sort(SortKey::Name)));
    assert_eq!(key_command(key(KeyCode::Char('q'))), Some(Command::Quit));
    assert_eq!(key_command(key(KeyCode::Esc)), Some(Command::Quit));
    assert_eq!(
        key_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Command::Quit)
    );
    assert_eq!(key_command(key(KeyCode::Char('x'))), None);
}

// Five samplers publish as fast as they can while sort commands arrive; every
// intermediate state must be internally consistent.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_publishers_never_corrupt_state() {
    let mut lifecycle = Lifecycle::new();
    let tick = Duration::from_millis(1);

    let mut c = 0u64;
    let (cpu, h) = spawn_sampler(
        "cpu",
        move || {
            c += 1;
            Ok::<_, ProbeError>(CpuSample {
                percent: (c % 100) as f64,
            })
        },
        tick,
        lifecycle.token(),
    );
    lifecycle.track(h);

    let mut m = 0u64;
    let (memory, h) = spawn_sampler(
        "memory",
        move || {
            m += 1;
            Ok::<_, ProbeError>(MemSample {
                total: m * 2,
                used: m,
                used_percent: 50.0,
            })
        },
        tick,
        lifecycle.token(),
    );
    lifecycle.track(h);

    let mut k = 0u64;
    let (disk, h) = spawn_sampler(
        "disk",
        move || {
            k += 1;
            if k % 5 == 0 {
                return Err(ProbeError::Source("flaky".into()));
            }
            Ok(DiskSample {
                path: "/data".into(),
                total: k * 4,
                used: k,
                used_percent: 25.0,
            })
        },
        tick,
        lifecycle.token(),
    );
    lifecycle.track(h);

    let mut n = 0u64;
    let (network, h) = spawn_sampler(
        "network",
        move || {
            n += 1;
            Ok::<_, ProbeError>(NetSample {
                sent_rate: n as f64,
                recv_rate: n as f64,
                total_sent: n,
                total_recv: n,
                missing_interface: None,
            })
        },
        tick,
        lifecycle.token(),
    );
    lifecycle.track(h);

    let mut size = 0u32;
    let (processes, h) = spawn_sampler(
        "processes",
        move || {
            size = (size + 3) % 40;
            Ok::<_, ProbeError>(table(size))
        },
        tick,
        lifecycle.token(),
    );
    lifecycle.track(h);

    let feeds = Feeds {
        cpu,
        memory,
        disk,
        network,
        processes,
    };
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let mut d = Dispatcher::new(
        feeds,
        Duration::from_millis(2),
        commands(cmd_rx),
        lifecycle.token(),
    );
    let mut state = DashboardState::default();
    let keys = [SortKey::Cpu, SortKey::Mem, SortKey::Pid, SortKey::Name];

    for i in 0..3000usize {
        if i % 150 == 0 {
            let _ = cmd_tx.try_send(Command::Sort(keys[(i / 150) % keys.len()]));
        }
        let ev = timeout(WAIT, d.next()).await.expect("stalled").expect("cancelled");
        apply(&mut state, ev);

        assert_eq!(state.memory.used * 2, state.memory.total);
        assert_eq!(state.network.total_sent, state.network.total_recv);
        assert!(
            state.disk == DiskSample::default()
                || (state.disk.path == "/data" && state.disk.used * 4 == state.disk.total)
        );
        let key = state.sort_key;
        let dir = state.sort_direction;
        assert!(
            state.processes.windows(2).all(|w| ordered(key, dir, &w[0], &w[1])),
            "table out of order for {key:?} {dir:?}"
        );
    }

    assert!(lifecycle.shutdown(WAIT).await);
    assert_eq!(d.next().await, None);
}

fn ordered(key: SortKey, dir: SortDirection, a: &ProcessEntry, b: &ProcessEntry) -> bool {
    let ord = match key {
        SortKey::Pid => a.pid.cmp(&b.pid),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Cpu => a.cpu_percent.total_cmp(&b.cpu_percent),
        SortKey::Mem => a.memory_bytes.cmp(&b.memory_bytes),
    };
    match dir {
        SortDirection::Ascending => ord.is_le(),
        SortDirection::Descending => ord.is_ge(),
    }
}
