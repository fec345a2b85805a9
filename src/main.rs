use std::io;
use std::path::{Path, PathBuf};
use std::process::Command as Process;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::{Color, Colorize};

use sentiview::config::ENDPOINT_ENV;
use sentiview::logging::{self, Surface};
use sentiview::render::{BorderColor, ChartConfig, ResultsView};
use sentiview::report::{self, ReportMeta};
use sentiview::{AnalysisFormController, Config, HttpTransport};

/// Width of the distribution bar printed under the percentages
const BAR_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "sentiview")]
#[command(author, version, about = "Sentiment analysis of a URL's comments, from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a URL once and print the results
    Analyze {
        /// URL whose comments should be analyzed
        url: String,

        /// Analysis endpoint (overrides SENTIVIEW_ENDPOINT and the config file)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Print the raw response JSON instead of the formatted view
        #[arg(long)]
        json: bool,

        /// Also write a report to PATH (.html or .json)
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,

        /// Write an auto-named HTML report into the configured report directory
        #[arg(long)]
        report: bool,

        /// Open the written report afterwards
        #[arg(long)]
        open: bool,
    },

    /// Interactive terminal form
    Tui {
        /// Analysis endpoint (overrides SENTIVIEW_ENDPOINT and the config file)
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            url,
            endpoint,
            json,
            html,
            report,
            open,
        } => {
            let options = AnalyzeOptions {
                json,
                report_path: html,
                auto_report: report,
                open,
            };
            std::process::exit(run_analyze(&url, endpoint.as_deref(), &options));
        }
        Command::Tui { endpoint } => {
            std::process::exit(run_tui(endpoint.as_deref()));
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sentiview", &mut io::stdout());
        }
    }
}

struct AnalyzeOptions {
    json: bool,
    report_path: Option<PathBuf>,
    auto_report: bool,
    open: bool,
}

/// Load config and install the logger. Exit status 2 on config errors.
fn setup(surface: Surface) -> Result<Config, i32> {
    let config = Config::load().map_err(|e| {
        eprintln!("{} {}", "Error:".red().bold(), e);
        2
    })?;

    if let Err(e) = logging::init(&config.logging, surface) {
        eprintln!("{} Failed to open log file: {}", "Warning:".yellow(), e);
    }
    Ok(config)
}

fn resolve_endpoint(config: &Config, flag: Option<&str>) -> Result<String, i32> {
    let env = std::env::var(ENDPOINT_ENV).ok();
    config
        .resolve_endpoint(flag, env.as_deref())
        .map(|url| url.to_string())
        .map_err(|e| {
            eprintln!("{} {}", "Error:".red().bold(), e);
            2
        })
}

fn run_analyze(url: &str, endpoint_flag: Option<&str>, options: &AnalyzeOptions) -> i32 {
    let config = match setup(Surface::Terminal) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let endpoint = match resolve_endpoint(&config, endpoint_flag) {
        Ok(endpoint) => endpoint,
        Err(code) => return code,
    };
    let transport = match HttpTransport::new(config.timeout()) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return 1;
        }
    };

    let mut form = AnalysisFormController::new();
    form.set_url_input(url);

    let Some(outcome) = form.submit(&transport, &endpoint, url) else {
        eprintln!("{} Please enter a URL", "Error:".red().bold());
        return 2;
    };

    let analysis = match outcome {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e.banner_message());
            form.teardown();
            return 1;
        }
    };

    if options.json {
        match serde_json::to_string_pretty(&analysis.raw) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                form.teardown();
                return 1;
            }
        }
    } else {
        print_view(form.view());
    }

    let report_path = options.report_path.clone().or_else(|| {
        options
            .auto_report
            .then(|| report::default_report_path(&config.report.dir))
    });

    let mut status = 0;
    if let Some(path) = report_path {
        match report::generate(&path, form.view(), &ReportMeta::now(url)) {
            Ok(()) => {
                eprintln!("{}", format!("Report saved: {}", path.display()).green());
                if options.open {
                    if let Err(e) = open_report(&path) {
                        log::warn!("Failed to open report {}: {}", path.display(), e);
                        eprintln!("{} Failed to open report: {}", "Warning:".yellow(), e);
                    }
                }
            }
            Err(e) => {
                eprintln!("{} Failed to write report: {}", "Error:".red().bold(), e);
                status = 1;
            }
        }
    }

    form.teardown();
    status
}

fn run_tui(endpoint_flag: Option<&str>) -> i32 {
    let config = match setup(Surface::Tui) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let endpoint = match resolve_endpoint(&config, endpoint_flag) {
        Ok(endpoint) => endpoint,
        Err(code) => return code,
    };
    let transport = match HttpTransport::new(config.timeout()) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return 1;
        }
    };

    match sentiview::tui::run(&endpoint, Arc::new(transport)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} TUI error: {}", "Error:".red().bold(), e);
            1
        }
    }
}

// =============================================================================
// Terminal output
// =============================================================================

fn print_view(view: &ResultsView) {
    println!("{}", "Sentiment Analysis".bold());
    println!("{}", "─".repeat(BAR_WIDTH + 10));

    let rows = [
        ("Positive", &view.percentages.positive, Color::Green),
        ("Neutral", &view.percentages.neutral, Color::BrightBlack),
        ("Negative", &view.percentages.negative, Color::Red),
    ];
    for (label, value, color) in rows {
        println!("  {:<10} {}", format!("{}:", label).color(color), value);
    }

    if let Some(chart) = view.chart() {
        println!();
        println!("  {}", distribution_bar(chart));
    }

    println!();
    println!("{} ({})", "Comments".bold(), view.comments.len());
    println!("{}", "─".repeat(BAR_WIDTH + 10));
    for comment in &view.comments {
        let color = terminal_color(comment.border);
        println!("{} {}", "▌".color(color), comment.text);
        println!(
            "{} {}  {}",
            "▌".color(color),
            comment.label.color(color).bold(),
            comment.confidence.dimmed()
        );
    }
}

/// One-line bar with a segment per category, sized by its share
fn distribution_bar(chart: &ChartConfig) -> String {
    let colors = [Color::Green, Color::BrightBlack, Color::Red];
    let mut bar = String::new();
    let mut used = 0;
    let fractions = chart.fractions();
    for (i, fraction) in fractions.iter().enumerate() {
        let width = if i + 1 == fractions.len() && used > 0 {
            BAR_WIDTH.saturating_sub(used)
        } else {
            (fraction * BAR_WIDTH as f64).round() as usize
        };
        let width = width.min(BAR_WIDTH - used);
        used += width;
        let color = colors.get(i).copied().unwrap_or(Color::White);
        bar.push_str(&"█".repeat(width).color(color).to_string());
    }
    if used == 0 {
        bar.push_str(&"░".repeat(BAR_WIDTH).dimmed().to_string());
    }
    bar
}

fn terminal_color(border: BorderColor) -> Color {
    match border {
        BorderColor::Green => Color::Green,
        BorderColor::Gray => Color::BrightBlack,
        BorderColor::Red => Color::Red,
    }
}

/// Hand the report to the platform's default opener
fn open_report(path: &Path) -> io::Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    let status = Process::new(opener).arg(path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{} exited with {}", opener, status)))
    }
}
