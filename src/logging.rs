//! Logger setup
//!
//! `RUST_LOG` wins over `[logging] level`. When a log file is configured all
//! output goes there; otherwise it goes to stderr, except under the TUI where
//! stderr would draw over the alternate screen and logging is switched off.

use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::config::LoggingConfig;

/// Where the process is about to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Terminal,
    Tui,
}

/// Install the global logger. Safe to call more than once; later calls are no-ops.
pub fn init(config: &LoggingConfig, surface: Surface) -> std::io::Result<()> {
    let env = Env::default().default_filter_or(config.level.as_str());
    let mut builder = builder(config, surface, env)?;

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
    Ok(())
}

fn builder(config: &LoggingConfig, surface: Surface, env: Env<'_>) -> std::io::Result<Builder> {
    match (&config.file, surface) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let mut builder = Builder::from_env(env);
            builder.target(Target::Pipe(Box::new(file)));
            Ok(builder)
        }
        // fresh builder: a RUST_LOG module directive would otherwise reach stderr
        (None, Surface::Tui) => {
            let mut builder = Builder::new();
            builder.filter_level(LevelFilter::Off);
            Ok(builder)
        }
        (None, Surface::Terminal) => {
            let mut builder = Builder::from_env(env);
            builder.target(Target::Stderr);
            Ok(builder)
        }
    }
}
