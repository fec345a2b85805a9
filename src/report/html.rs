//! HTML report generation with a Chart.js donut
//!
//! Every server-supplied string is HTML-escaped before it lands in the page.
//! The chart config is embedded as JSON with `</` broken up so it cannot close
//! the surrounding script tag.

use std::io::{self, Write};

use crate::render::{CommentItem, ResultsView};
use crate::report::ReportMeta;

pub fn write<W: Write>(writer: &mut W, view: &ResultsView, meta: &ReportMeta) -> io::Result<()> {
    let chart_json = view
        .chart()
        .map(|chart| script_safe_json(&chart.to_chartjs()))
        .unwrap_or_else(|| "null".to_string());

    let comments: String = view.comments.iter().map(comment_html).collect();
    let comments = if comments.is_empty() {
        r#"<p class="empty">No comments were classified.</p>"#.to_string()
    } else {
        comments
    };

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sentiment Analysis: {title}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        :root {{
            --bg: #f5f5f7;
            --card: #ffffff;
            --text: #1d1d1f;
            --dim: #86868b;
            --positive: #10B981;
            --neutral: #6B7280;
            --negative: #EF4444;
            --shadow: 0 2px 8px rgba(0,0,0,0.08), 0 1px 2px rgba(0,0,0,0.04);
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Helvetica Neue', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 960px; margin: 0 auto; padding: 3rem 2rem; }}
        .header {{ margin-bottom: 2rem; }}
        .logo {{ font-size: 2rem; font-weight: 700; letter-spacing: -0.02em; }}
        .subtitle {{ color: var(--dim); font-size: 0.9375rem; word-break: break-all; }}

        .stats {{
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 1.25rem;
            margin-bottom: 2rem;
        }}
        .stat {{
            background: var(--card);
            border-radius: 16px;
            padding: 1.5rem;
            text-align: center;
            box-shadow: var(--shadow);
        }}
        .stat-value {{ font-size: 2.5rem; font-weight: 600; line-height: 1; }}
        .stat-label {{ color: var(--dim); font-size: 0.8125rem; text-transform: uppercase; margin-top: 0.5rem; }}
        .stat.positive .stat-value {{ color: var(--positive); }}
        .stat.neutral .stat-value {{ color: var(--neutral); }}
        .stat.negative .stat-value {{ color: var(--negative); }}

        .card {{
            background: var(--card);
            border-radius: 16px;
            padding: 1.75rem;
            box-shadow: var(--shadow);
            margin-bottom: 2rem;
        }}
        .card-title {{ font-size: 0.9375rem; font-weight: 600; margin-bottom: 1.25rem; }}
        .chart-wrap {{ max-width: 360px; margin: 0 auto; }}

        .comment {{ border-left: 4px solid var(--neutral); padding: 1rem; background: #f9fafb; margin-bottom: 1rem; }}
        .comment.border-green-500 {{ border-left-color: var(--positive); }}
        .comment.border-gray-500 {{ border-left-color: var(--neutral); }}
        .comment.border-red-500 {{ border-left-color: var(--negative); }}
        .comment-text {{ font-size: 0.875rem; color: #4b5563; white-space: pre-wrap; }}
        .comment-meta {{ margin-top: 0.5rem; font-size: 0.75rem; font-weight: 600; display: flex; justify-content: space-between; }}
        .empty {{ color: var(--dim); text-align: center; }}
        .footer {{ color: var(--dim); font-size: 0.75rem; text-align: center; }}
    </style>
</head>
<body>
<div class="container">
    <div class="header">
        <div class="logo">Sentiment Analysis</div>
        <div class="subtitle">{source}</div>
    </div>

    <div class="stats">
        <div class="stat positive">
            <div class="stat-value" id="positivePercentage">{positive}</div>
            <div class="stat-label">Positive</div>
        </div>
        <div class="stat neutral">
            <div class="stat-value" id="neutralPercentage">{neutral}</div>
            <div class="stat-label">Neutral</div>
        </div>
        <div class="stat negative">
            <div class="stat-value" id="negativePercentage">{negative}</div>
            <div class="stat-label">Negative</div>
        </div>
    </div>

    <div class="card">
        <div class="card-title">Distribution</div>
        <div class="chart-wrap"><canvas id="sentimentChart"></canvas></div>
    </div>

    <div class="card">
        <div class="card-title">Comments ({count})</div>
        <div id="commentsList">
{comments}
        </div>
    </div>

    <div class="footer">Generated by sentiview {version} on {generated_at}</div>
</div>
<script>
    const config = {chart_json};
    if (config && window.Chart) {{
        new Chart(document.getElementById('sentimentChart').getContext('2d'), config);
    }}
</script>
</body>
</html>
"#,
        title = escape_html(&meta.source_url),
        source = escape_html(&meta.source_url),
        positive = escape_html(&view.percentages.positive),
        neutral = escape_html(&view.percentages.neutral),
        negative = escape_html(&view.percentages.negative),
        count = view.comments.len(),
        comments = comments,
        version = env!("CARGO_PKG_VERSION"),
        generated_at = escape_html(&meta.generated_at),
        chart_json = chart_json,
    )?;

    Ok(())
}

fn comment_html(item: &CommentItem) -> String {
    format!(
        r#"            <div class="comment {border}">
                <p class="comment-text">{text}</p>
                <div class="comment-meta">
                    <span>{label}</span>
                    <span>{confidence}</span>
                </div>
            </div>
"#,
        border = item.border.css_class(),
        text = escape_html(&item.text),
        label = escape_html(&item.label),
        confidence = escape_html(&item.confidence),
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize JSON for inline embedding inside a <script> element
fn script_safe_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResponse;
    use crate::render::ResultsRenderer;
    use serde_json::json;

    fn render(data: serde_json::Value) -> ResultsView {
        let mut view = ResultsView::default();
        let response = AnalysisResponse::from_value(&data).unwrap();
        ResultsRenderer::new().render(&mut view, &response);
        view
    }

    fn meta() -> ReportMeta {
        ReportMeta {
            source_url: "http://example.com/?a=1&b=2".to_string(),
            generated_at: "2026-10-18 12:00:00".to_string(),
        }
    }

    fn to_string(view: &ResultsView) -> String {
        let mut out = Vec::new();
        write(&mut out, view, &meta()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"hi" & 'bye'</b>"#),
            "&lt;b&gt;&quot;hi&quot; &amp; &#39;bye&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_report_contains_view() {
        let html = to_string(&render(json!({
            "statistics": {"positive": 70, "neutral": 20, "negative": 10},
            "results": [{"text": "Great!", "sentiment": "Positive", "confidence": 95}]
        })));

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains(">70%<"));
        assert!(html.contains(">20%<"));
        assert!(html.contains(">10%<"));
        assert!(html.contains(r#"class="comment border-green-500""#));
        assert!(html.contains("Great!"));
        assert!(html.contains("Confidence: 95%"));
        assert!(html.contains(r#""type":"doughnut""#));
        assert!(html.contains("http://example.com/?a=1&amp;b=2"));
    }

    #[test]
    fn test_report_escapes_comment_text() {
        let html = to_string(&render(json!({
            "statistics": {"positive": 1},
            "results": [{"text": "<script>alert(1)</script>", "sentiment": "<i>Odd</i>"}]
        })));

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;i&gt;Odd&lt;/i&gt;"));
        // unknown sentiment falls back to gray
        assert!(html.contains(r#"class="comment border-gray-500""#));
    }

    #[test]
    fn test_report_without_chart_or_comments() {
        let view = ResultsView::default();
        let html = to_string(&view);
        assert!(html.contains("const config = null;"));
        assert!(html.contains("No comments were classified."));
    }

    #[test]
    fn test_script_safe_json() {
        let value = json!({"label": "</script><script>"});
        let safe = script_safe_json(&value);
        assert!(!safe.contains("</script>"));
        assert!(safe.contains(r#"<\/script>"#));
    }
}
