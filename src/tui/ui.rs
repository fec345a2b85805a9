//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use super::views::{chart, comments, summary};
use crate::render::CHART_COLORS;

// Fixed rows around the results area: header, form, banner, footer
const HEADER_ROWS: u16 = 1;
const FORM_ROWS: u16 = 3;
const BANNER_ROWS: u16 = 1;
const FOOTER_ROWS: u16 = 1;
const SUMMARY_ROWS: u16 = 3;

/// Main draw function - orchestrates all rendering
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, form, banner, results, footer
    let main_layout = Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Length(FORM_ROWS),
        Constraint::Length(BANNER_ROWS),
        Constraint::Min(6),
        Constraint::Length(FOOTER_ROWS),
    ])
    .split(area);

    draw_header(frame, app, main_layout[0]);
    draw_form(frame, app, main_layout[1]);
    draw_error_banner(frame, app, main_layout[2]);
    draw_results(frame, app, main_layout[3]);
    draw_footer(frame, app, main_layout[4]);

    if app.show_help {
        draw_help_overlay(frame, area);
    }
}

/// Comments that fit on screen for a terminal `height` rows tall
pub fn visible_comment_rows(height: u16) -> usize {
    let results =
        height.saturating_sub(HEADER_ROWS + FORM_ROWS + BANNER_ROWS + FOOTER_ROWS + SUMMARY_ROWS);
    // comment list borders
    comments::visible_comments(results.saturating_sub(2))
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_text = format!(" Sentiview │ {}", app.endpoint);

    let header =
        Paragraph::new(header_text).style(Style::default().bg(Color::Blue).fg(Color::White).bold());

    frame.render_widget(header, area);
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::horizontal([Constraint::Min(20), Constraint::Length(24)]).split(area);

    let input_block = Block::default()
        .title(" URL ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let input_inner = input_block.inner(layout[0]);

    let input = if app.url_input().is_empty() {
        Paragraph::new("https://...").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.url_input())
    };
    frame.render_widget(input.block(input_block), layout[0]);

    let view = app.view();
    let button_style = if app.controller.state().is_ready() {
        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };
    let button = Paragraph::new(view.button_label.as_str())
        .style(button_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, layout[1]);

    if !app.show_help {
        let typed = app.url_input().chars().count() as u16;
        let max_x = input_inner.x + input_inner.width.saturating_sub(1);
        frame.set_cursor_position(((input_inner.x + typed).min(max_x), input_inner.y));
    }
}

fn draw_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(banner) = &app.view().error_banner else {
        return;
    };

    let text = Paragraph::new(format!(" ✗ {}", banner.message))
        .style(Style::default().bg(Color::Red).fg(Color::White).bold());
    frame.render_widget(text, area);
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();

    if view.loading_visible {
        let loading = Paragraph::new(format!("{} {}", app.spinner(), view.button_label))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        let center = Layout::vertical([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
        frame.render_widget(loading, center[1]);
        return;
    }

    if !view.results_visible {
        let hint = Paragraph::new("Enter a URL and press Enter to analyze its comments")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        frame.render_widget(hint, area);
        return;
    }

    let layout =
        Layout::vertical([Constraint::Length(SUMMARY_ROWS), Constraint::Min(3)]).split(area);
    summary::draw(frame, &view.percentages, layout[0]);

    let content =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(layout[1]);
    chart::draw(frame, view.chart(), content[0]);
    comments::draw(frame, &view.comments, app.comment_scroll, content[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keybinds = if app.url_input().is_empty() {
        "Enter:analyze  ↑/↓:scroll  PgUp/PgDn:page  ?:help  q:quit"
    } else {
        "Enter:analyze  Esc:clear  ↑/↓:scroll  PgUp/PgDn:page  F1:help  Ctrl+c:quit"
    };

    let footer = Paragraph::new(format!(" {}", keybinds))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    // Center the help popup
    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 18.min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width - popup_width) / 2,
        y: (area.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = r#"
  Form
  ─────────────────────────────────
  Enter        Analyze the URL
  Esc, Ctrl+u  Clear the URL
  Backspace    Delete a character

  Results
  ─────────────────────────────────
  ↑/↓          Scroll comments
  PgUp/PgDn    Page comments
  Ctrl+d       Page down

  General
  ─────────────────────────────────
  ?, F1        Toggle help
  q, Ctrl+c    Quit
"#;

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(help, popup_area);
}

/// Terminal color for the chart category at `index`
pub fn sentiment_color(index: usize) -> Color {
    CHART_COLORS
        .get(index)
        .map(|hex| chart::hex_color(hex))
        .unwrap_or(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{interpret, RawResponse};
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_visible_comment_rows() {
        // 40 rows: 40 - 9 fixed - 2 borders = 29 rows, 2 per comment
        assert_eq!(visible_comment_rows(40), 14);
        assert_eq!(visible_comment_rows(5), 1);
    }

    #[test]
    fn test_draw_idle() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let app = App::new("http://localhost:8000/analyze/");
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sentiview"));
        assert!(text.contains("Analyze Sentiment"));
    }

    #[test]
    fn test_draw_results_and_banner() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut app = App::new("http://api");
        app.controller.set_url_input("http://example.com");
        let submission = app.controller.begin_submit("http://example.com").unwrap();
        let outcome = interpret(&RawResponse::new(
            200,
            r#"{"statistics":{"positive":70,"neutral":20,"negative":10},
                "results":[{"text":"Great video!","sentiment":"Positive","confidence":95}]}"#,
        ));
        app.controller.settle(submission.generation, &outcome, Instant::now());
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("70%"));
        assert!(text.contains("Great video!"));
        assert!(text.contains("Confidence: 95%"));

        app.controller.show_error("Rate limited", Instant::now());
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Rate limited"));
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut app = App::new("http://api");
        app.show_help = true;
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Toggle help"));
    }
}
