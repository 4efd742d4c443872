use std::fmt;
use std::path::PathBuf;

use crate::SessionStats;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// `index` is 1-based.
    Processing { index: usize, total: usize },
    Summarizing,
    Done,
}

/// Outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub stats: SessionStats,
    pub results_path: PathBuf,
}

impl SessionReport {
    pub fn new(stats: SessionStats, results_path: impl Into<PathBuf>) -> Self {
        Self {
            stats,
            results_path: results_path.into(),
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "SearchBot session complete")?;
        writeln!(f, "Queries processed: {}", self.stats.queries_processed())?;
        writeln!(f, "Total URLs found: {}", self.stats.urls_found())?;
        writeln!(f, "Errors encountered: {}", self.stats.errors())?;
        writeln!(f, "Results saved to: {}", self.results_path.display())?;
        write!(f, "{rule}")
    }
}
