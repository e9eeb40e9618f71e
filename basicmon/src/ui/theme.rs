//! Shared UI theme constants.

use ratatui::style::Color;

pub const CPU_FG: Color = Color::Cyan;
pub const MEM_FG: Color = Color::Magenta;
pub const HEADER_FG: Color = Color::Cyan;
pub const MUTED_FG: Color = Color::DarkGray;
pub const WARN_FG: Color = Color::Yellow;

// Disk gauge colors by fill level
pub fn disk_fg(pct: u16) -> Color {
    if pct < 70 {
        Color::Green
    } else if pct < 90 {
        Color::Yellow
    } else {
        Color::Red
    }
}
