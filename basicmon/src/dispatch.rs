//! Fan-in of every sampler feed, the redraw timer and user input into one serialized
//! stream of events, plus the routing of those events into the dashboard state.

use basicmon_sampler::{CpuSample, DiskSample, Feeds, MemSample, NetSample, ProcessTable};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::{Stream, StreamExt};
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::state::{DashboardState, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Sort(SortKey),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Cpu(CpuSample),
    Memory(MemSample),
    Disk(DiskSample),
    Network(NetSample),
    Processes(ProcessTable),
    Redraw,
    Command(Command),
}

/// What the loop should do after an event has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Draw,
    Quit,
}

pub struct Dispatcher<I> {
    feeds: Feeds,
    redraw: Interval,
    input: I,
    cancel: CancellationToken,
}

impl<I> Dispatcher<I>
where
    I: Stream<Item = Command> + Unpin,
{
    pub fn new(feeds: Feeds, redraw_every: Duration, input: I, cancel: CancellationToken) -> Self {
        let mut redraw = interval(redraw_every);
        redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            feeds,
            redraw,
            input,
            cancel,
        }
    }

    /// Wait for whichever source is ready first. Returns `None` once cancelled, and
    /// keeps returning `None` after that. A closed feed just stops taking part.
    pub async fn next(&mut self) -> Option<Event> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let event = tokio::select! {
            _ = self.cancel.cancelled() => return None,
            Some(s) = self.feeds.cpu.recv() => Event::Cpu(s),
            Some(s) = self.feeds.memory.recv() => Event::Memory(s),
            Some(s) = self.feeds.disk.recv() => Event::Disk(s),
            Some(s) = self.feeds.network.recv() => Event::Network(s),
            Some(t) = self.feeds.processes.recv() => Event::Processes(t),
            _ = self.redraw.tick() => Event::Redraw,
            Some(c) = self.input.next() => Event::Command(c),
        };
        // a sample that raced with cancellation is not delivered
        if self.cancel.is_cancelled() {
            return None;
        }
        Some(event)
    }
}

/// Apply one event to the state. Samples never trigger a draw on their own.
pub fn apply(state: &mut DashboardState, event: Event) -> Action {
    match event {
        Event::Cpu(s) => state.apply_cpu(s),
        Event::Memory(s) => state.apply_memory(s),
        Event::Disk(s) => state.apply_disk(s),
        Event::Network(s) => state.apply_network(s),
        Event::Processes(t) => state.apply_processes(t),
        Event::Redraw => {
            state.mark_refreshed(Local::now());
            return Action::Draw;
        }
        Event::Command(Command::Sort(key)) => {
            state.set_sort(key, true);
            return Action::Draw;
        }
        Event::Command(Command::Quit) => return Action::Quit,
    }
    Action::Continue
}

pub fn key_command(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') => Some(Command::Sort(SortKey::Cpu)),
        KeyCode::Char('m') => Some(Command::Sort(SortKey::Mem)),
        KeyCode::Char('p') => Some(Command::Sort(SortKey::Pid)),
        KeyCode::Char('n') => Some(Command::Sort(SortKey::Name)),
        _ => None,
    }
}
