//! Disk usage gauge for the monitored path.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::state::DashboardState;
use crate::ui::theme::disk_fg;
use crate::ui::util::{gauge_percent, human_si};

pub fn draw_disk(f: &mut ratatui::Frame<'_>, area: Rect, state: &DashboardState, path: &str) {
    let d = &state.disk;
    // the sample carries no path until the first successful read
    let shown = if d.path.is_empty() { path } else { d.path.as_str() };
    let pct = gauge_percent(d.used_percent);

    let g = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Disk ({shown})")),
        )
        .gauge_style(Style::default().fg(disk_fg(pct)))
        .percent(pct)
        .label(format!(
            "{} / {} ({:.2}%)",
            human_si(d.used),
            human_si(d.total),
            d.used_percent
        ));
    f.render_widget(g, area);
}
