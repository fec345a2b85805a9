//! Comments view - scrollable list of per-comment results

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::render::{BorderColor, CommentItem};
use crate::tui::views::chart::hex_color;

/// Rows each comment occupies: text line and label line
pub const ROWS_PER_COMMENT: usize = 2;

/// Draw the comment list starting at entry `scroll`
pub fn draw(frame: &mut Frame, comments: &[CommentItem], scroll: usize, area: Rect) {
    let block = Block::default()
        .title(format!(" Comments ({}) ", comments.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if comments.is_empty() {
        let empty = Paragraph::new("No comments")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner_area);
        return;
    }

    let visible = visible_comments(inner_area.height);
    let width = inner_area.width.saturating_sub(3) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for comment in comments.iter().skip(scroll).take(visible) {
        let bar = Span::styled("▌ ", Style::default().fg(border_color(comment.border)));
        lines.push(Line::from(vec![
            bar.clone(),
            Span::raw(truncate(&comment.text, width)),
        ]));
        lines.push(Line::from(vec![
            bar,
            Span::styled(
                comment.label.clone(),
                Style::default().fg(border_color(comment.border)).bold(),
            ),
            Span::raw("  "),
            Span::styled(
                comment.confidence.clone(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner_area);

    if comments.len() > visible {
        let mut state = ScrollbarState::new(comments.len()).position(scroll);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut state,
        );
    }
}

/// How many comments fit in `height` rows
pub fn visible_comments(height: u16) -> usize {
    (height as usize / ROWS_PER_COMMENT).max(1)
}

fn border_color(border: BorderColor) -> Color {
    hex_color(border.hex())
}

fn truncate(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
