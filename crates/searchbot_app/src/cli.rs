use std::path::PathBuf;

use clap::Parser;
use searchbot_logging::{LevelFilter, LogDestination};

/// Automated web search and URL collection tool.
#[derive(Debug, Parser)]
#[command(name = "searchbot", version, about)]
pub struct Args {
    /// Queries file, one query per line
    #[arg(short = 'q', long = "queries", default_value = "queries.txt")]
    pub queries: PathBuf,

    /// Output file that result blocks are appended to
    #[arg(short = 'o', long = "output", default_value = "results.txt")]
    pub output: PathBuf,

    /// Max results per query
    #[arg(short = 'n', long = "num-results", default_value_t = 5)]
    pub num_results: usize,

    /// Also write diagnostics to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Enable debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.log_file.is_some() {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}
