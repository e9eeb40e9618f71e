//! CPU usage gauge.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::state::DashboardState;
use crate::ui::theme::CPU_FG;
use crate::ui::util::gauge_percent;

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, state: &DashboardState) {
    let pct = state.cpu.percent;
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("CPU"))
        .gauge_style(Style::default().fg(CPU_FG))
        .percent(gauge_percent(pct))
        .label(format!("{pct:6.2}%"));
    f.render_widget(g, area);
}
