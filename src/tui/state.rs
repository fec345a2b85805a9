//! Pure state transformations for the TUI (Functional Core)
//!
//! No I/O here. The imperative shell (mod.rs, app.rs) calls into these.

use std::f64::consts::PI;

// =============================================================================
// Scrolling - Pure index calculations
// =============================================================================

/// Largest useful scroll offset for a list of `total` items in `visible` rows
pub fn max_scroll(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible.max(1))
}

/// Scroll by `delta` rows, clamped to [0, max_scroll]
pub fn scroll_by(current: usize, delta: isize, total: usize, visible: usize) -> usize {
    let max = max_scroll(total, visible);
    if delta >= 0 {
        (current + delta as usize).min(max)
    } else {
        current.saturating_sub(delta.unsigned_abs()).min(max)
    }
}

// =============================================================================
// Spinner
// =============================================================================

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for a tick counter
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

// =============================================================================
// Donut geometry
// =============================================================================

/// Sample points of a ring split into segments by `fractions`.
///
/// Returns one point list per segment. Angles start at 12 o'clock and run
/// clockwise, like a browser doughnut chart. `inner`/`outer` are radii in
/// canvas units; `steps` is the number of angular samples around the ring.
pub fn ring_segments(
    fractions: &[f64],
    inner: f64,
    outer: f64,
    steps: usize,
) -> Vec<Vec<(f64, f64)>> {
    let mut segments: Vec<Vec<(f64, f64)>> = vec![Vec::new(); fractions.len()];
    if fractions.is_empty() || steps == 0 || outer <= inner {
        return segments;
    }

    // cumulative upper bounds of each segment, in [0, 1]
    let mut bounds = Vec::with_capacity(fractions.len());
    let mut acc = 0.0;
    for f in fractions {
        acc += f.max(0.0);
        bounds.push(acc);
    }

    let radial_steps = ((outer - inner) * 20.0).ceil().max(2.0) as usize;

    for step in 0..steps {
        let t = (step as f64 + 0.5) / steps as f64;
        let Some(segment) = bounds.iter().position(|b| t <= *b) else {
            continue;
        };
        let angle = PI / 2.0 - t * 2.0 * PI;
        let (sin, cos) = angle.sin_cos();
        for r in 0..=radial_steps {
            let radius = inner + (outer - inner) * r as f64 / radial_steps as f64;
            segments[segment].push((radius * cos, radius * sin));
        }
    }

    segments
}

// =============================================================================
// Colors
// =============================================================================

/// Parse `#RRGGBB` into its components
pub fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

// =============================================================================
// Tests
// =============================================================================
