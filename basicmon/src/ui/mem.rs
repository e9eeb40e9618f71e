//! Memory gauge.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::state::DashboardState;
use crate::ui::theme::MEM_FG;
use crate::ui::util::{gauge_percent, human_si};

pub fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, state: &DashboardState) {
    let m = &state.memory;
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("RAM"))
        .gauge_style(Style::default().fg(MEM_FG))
        .percent(gauge_percent(m.used_percent))
        .label(format!(
            "{} / {} ({:.2}%)",
            human_si(m.used),
            human_si(m.total),
            m.used_percent
        ));
    f.render_widget(g, area);
}
