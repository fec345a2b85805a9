//! Chart view - the sentiment donut drawn with Braille points

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
};

use crate::render::ChartConfig;
use crate::tui::state::{parse_hex_rgb, ring_segments};

const OUTER_RADIUS: f64 = 1.0;
const INNER_RADIUS: f64 = 0.55;
const BOUND: f64 = 1.15;
const ANGULAR_STEPS: usize = 360;

/// Draw the donut chart with its legend below
pub fn draw(frame: &mut Frame, chart: Option<&ChartConfig>, area: Rect) {
    let block = Block::default()
        .title(" Sentiment Distribution ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let Some(chart) = chart else {
        let empty = Paragraph::new("No chart")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner_area);
        return;
    };

    let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(inner_area);

    draw_donut(frame, chart, layout[0]);
    draw_legend(frame, chart, layout[1]);
}

fn draw_donut(frame: &mut Frame, chart: &ChartConfig, area: Rect) {
    let segments = ring_segments(&chart.fractions(), INNER_RADIUS, OUTER_RADIUS, ANGULAR_STEPS);
    let colors: Vec<Color> = chart.colors.iter().map(|hex| hex_color(hex)).collect();

    // terminal cells are about twice as tall as they are wide
    let aspect = if area.height == 0 {
        1.0
    } else {
        area.width as f64 / (2.0 * area.height as f64)
    };
    let (x_half, y_half) = if aspect >= 1.0 {
        (BOUND * aspect, BOUND)
    } else {
        (BOUND, BOUND / aspect)
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([-y_half, y_half])
        .paint(|ctx| {
            for (points, color) in segments.iter().zip(colors.iter()) {
                ctx.draw(&Points {
                    coords: points,
                    color: *color,
                });
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_legend(frame: &mut Frame, chart: &ChartConfig, area: Rect) {
    let mut spans = Vec::new();
    for (i, label) in chart.labels.iter().enumerate() {
        let color = chart
            .colors
            .get(i)
            .map(|hex| hex_color(hex))
            .unwrap_or(Color::Gray);
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("■ ", Style::default().fg(color)));
        spans.push(Span::raw(label.clone()));
    }

    let legend = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(legend, area);
}

/// `#RRGGBB` to a terminal color, gray if unparseable
pub fn hex_color(hex: &str) -> Color {
    parse_hex_rgb(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}
