//! Summary view - the three percentage labels

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::render::{PercentageLabels, CHART_LABELS};
use crate::tui::ui::sentiment_color;

/// Draw the percentage row: one bordered cell per category
pub fn draw(frame: &mut Frame, percentages: &PercentageLabels, area: Rect) {
    let cells = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let values = [
        &percentages.positive,
        &percentages.neutral,
        &percentages.negative,
    ];

    for (i, value) in values.iter().enumerate() {
        let color = sentiment_color(i);
        let block = Block::default()
            .title(format!(" {} ", CHART_LABELS[i]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let text = Paragraph::new(value.as_str())
            .style(Style::default().fg(color).bold())
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(text, cells[i]);
    }
}
