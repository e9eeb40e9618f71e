//! Top processes table with a sort indicator in the header.

use basicmon_sampler::ProcessEntry;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::{DashboardState, SortDirection, SortKey};
use crate::ui::theme::{HEADER_FG, MUTED_FG};
use crate::ui::util::human_si;

/// Rows shown; the stored table is never truncated.
pub const TOP_N: usize = 10;

const COLS: [Constraint; 4] = [
    Constraint::Length(8),  // PID
    Constraint::Min(16),    // Name
    Constraint::Length(9),  // CPU %
    Constraint::Length(10), // Mem
];

/// Height that fits the header, `TOP_N` rows and borders.
pub const PANEL_HEIGHT: u16 = TOP_N as u16 + 3;

pub fn visible_rows(state: &DashboardState) -> &[ProcessEntry] {
    let n = state.processes.len().min(TOP_N);
    &state.processes[..n]
}

fn header_label(label: &'static str, key: SortKey, state: &DashboardState) -> String {
    if state.sort_key != key {
        return label.to_string();
    }
    let arrow = match state.sort_direction {
        SortDirection::Ascending => '▲',
        SortDirection::Descending => '▼',
    };
    format!("{label} {arrow}")
}

pub fn draw_processes(f: &mut ratatui::Frame<'_>, area: Rect, state: &DashboardState) {
    let title = format!("Processes ({} total)", state.processes.len());

    let rows = visible_rows(state).iter().map(|p| {
        let cpu_fg = match p.cpu_percent {
            x if x < 25.0 => Color::Green,
            x if x < 60.0 => Color::Yellow,
            _ => Color::Red,
        };
        Row::new(vec![
            Cell::from(p.pid.to_string()).style(Style::default().fg(MUTED_FG)),
            Cell::from(p.name.clone()),
            Cell::from(format!("{:>6.2}%", p.cpu_percent)).style(Style::default().fg(cpu_fg)),
            Cell::from(human_si(p.memory_bytes)),
        ])
    });

    let header = Row::new(vec![
        header_label("PID", SortKey::Pid, state),
        header_label("NAME", SortKey::Name, state),
        header_label("CPU%", SortKey::Cpu, state),
        header_label("MEM", SortKey::Mem, state),
    ])
    .style(Style::default().fg(HEADER_FG).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, COLS)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}
