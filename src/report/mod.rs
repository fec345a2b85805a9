//! Report output for a rendered analysis
//!
//! The format is picked from the file extension: `.json` writes a machine
//! readable summary, anything else writes the standalone HTML page.

pub mod html;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::json;

use crate::render::ResultsView;

/// Context printed alongside the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub source_url: String,
    pub generated_at: String,
}

impl ReportMeta {
    /// Metadata stamped with the current local time
    pub fn now(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Auto-generated report path inside `dir`
pub fn default_report_path(dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("sentiview_report_{}.html", timestamp))
}

/// Write a report to `path`, creating parent directories as needed
pub fn generate(path: &Path, view: &ResultsView, meta: &ReportMeta) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        write_json(&mut writer, view, meta)?;
    } else {
        html::write(&mut writer, view, meta)?;
    }
    writer.flush()?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

fn write_json<W: Write>(writer: &mut W, view: &ResultsView, meta: &ReportMeta) -> io::Result<()> {
    let comments: Vec<serde_json::Value> = view
        .comments
        .iter()
        .map(|c| {
            json!({
                "text": c.text,
                "sentiment": c.label,
                "confidence": c.confidence,
                "border": c.border.hex(),
            })
        })
        .collect();

    let doc = json!({
        "source_url": meta.source_url,
        "generated_at": meta.generated_at,
        "percentages": {
            "positive": view.percentages.positive,
            "neutral": view.percentages.neutral,
            "negative": view.percentages.negative,
        },
        "chart": view.chart().map(|c| c.to_chartjs()),
        "comments": comments,
    });

    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)
}
