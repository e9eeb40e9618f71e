//! Network throughput line.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::DashboardState;
use crate::ui::theme::{MUTED_FG, WARN_FG};
use crate::ui::util::{human_rate, human_si};

pub fn draw_net(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &DashboardState,
    interface: Option<&str>,
) {
    let title = match interface {
        Some(name) => format!("Network ({name})"),
        None => "Network".to_string(),
    };
    let n = &state.network;

    let line = match &n.missing_interface {
        Some(name) => Line::from(Span::styled(
            format!("interface '{name}' not found"),
            Style::default().fg(WARN_FG),
        )),
        None => Line::from(vec![
            Span::raw(format!(
                "↑ {:>12}   ↓ {:>12}",
                human_rate(n.sent_rate),
                human_rate(n.recv_rate)
            )),
            Span::styled(
                format!(
                    "   total ↑ {}  ↓ {}",
                    human_si(n.total_sent),
                    human_si(n.total_recv)
                ),
                Style::default().fg(MUTED_FG),
            ),
        ]),
    };

    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}
