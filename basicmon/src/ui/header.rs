//! Top header with the last refresh time, and the key help footer.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::DashboardState;
use crate::ui::theme::MUTED_FG;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, state: &DashboardState) {
    let title = format!(
        "Basic System Monitor — {}",
        state.last_refresh.format("%a, %d %b %Y %H:%M:%S %Z")
    );
    f.render_widget(Block::default().title(title).borders(Borders::NONE), area);
}

pub fn draw_footer(f: &mut ratatui::Frame<'_>, area: Rect, show_processes: bool) {
    let help = if show_processes {
        "sort: c cpu  m mem  p pid  n name (again to reverse)  |  q quit"
    } else {
        "q quit"
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(MUTED_FG)),
        area,
    );
}
