//! Renderer: a pure read of the dashboard state into a frame, one panel per module.

pub mod cpu;
pub mod disks;
pub mod header;
pub mod mem;
pub mod net;
pub mod processes;
pub mod theme;
pub mod util;

use ratatui::layout::{Constraint, Direction, Layout};

use crate::state::DashboardState;

/// Static presentation choices made at startup.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub disk_path: String,
    pub interface: Option<String>,
    pub show_processes: bool,
}

pub fn draw(f: &mut ratatui::Frame<'_>, state: &DashboardState, view: &ViewOptions) {
    let procs_height = if view.show_processes {
        processes::PANEL_HEIGHT
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // header
            Constraint::Length(3),            // cpu
            Constraint::Length(3),            // ram
            Constraint::Length(3),            // disk
            Constraint::Length(3),            // network
            Constraint::Length(procs_height), // processes
            Constraint::Min(0),
            Constraint::Length(1), // key help
        ])
        .split(f.area());

    header::draw_header(f, rows[0], state);
    cpu::draw_cpu(f, rows[1], state);
    mem::draw_mem(f, rows[2], state);
    disks::draw_disk(f, rows[3], state, &view.disk_path);
    net::draw_net(f, rows[4], state, view.interface.as_deref());
    if view.show_processes {
        processes::draw_processes(f, rows[5], state);
    }
    header::draw_footer(f, rows[7], view.show_processes);
}
