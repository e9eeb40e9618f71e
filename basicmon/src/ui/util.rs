//! Small UI helpers: SI byte formatting and percentages.

const SI_UNITS: [char; 6] = ['k', 'M', 'G', 'T', 'P', 'E'];

/// Decimal (1000-based) byte count: `999 B`, `1.5 kB`, `500.0 MB`.
pub fn human_si(b: u64) -> String {
    const UNIT: u64 = 1000;
    if b < UNIT {
        return format!("{b} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = b / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.1} {}B", b as f64 / div as f64, SI_UNITS[exp])
}

/// Rates arrive as floats; negative or NaN never reaches the screen.
pub fn human_rate(bytes_per_sec: f64) -> String {
    let b = if bytes_per_sec.is_finite() && bytes_per_sec > 0.0 {
        bytes_per_sec as u64
    } else {
        0
    };
    format!("{}/s", human_si(b))
}

/// Whole percent for gauges, clamped to 0..=100.
pub fn gauge_percent(p: f64) -> u16 {
    if p.is_finite() {
        p.clamp(0.0, 100.0).round() as u16
    } else {
        0
    }
}
