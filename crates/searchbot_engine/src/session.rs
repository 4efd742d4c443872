use searchbot_core::{Query, SessionPhase, SessionReport, SessionStats};
use searchbot_logging::{bot_debug, bot_error, bot_info, bot_warn};
use thiserror::Error;

use crate::{PacedSearchExecutor, Pacer, PersistError, ProgressSink, ResultSink, SessionEvent};

#[derive(Debug, Error)]
pub enum SessionError {
    /// The results log became unwritable; `stats` covers every query handled
    /// so far, including the one whose block was lost.
    #[error("failed to persist results for '{query}': {source}")]
    Persist {
        query: Query,
        stats: SessionStats,
        #[source]
        source: PersistError,
    },
}

/// Drives one session: every query in order, one at a time.
pub struct SessionRunner {
    executor: PacedSearchExecutor,
    sink: Box<dyn ResultSink>,
    pacer: Pacer,
    stats: SessionStats,
    phase: SessionPhase,
}

impl SessionRunner {
    pub fn new(
        executor: PacedSearchExecutor,
        sink: Box<dyn ResultSink>,
        pacer: Pacer,
        stats: SessionStats,
    ) -> Self {
        Self {
            executor,
            sink,
            pacer,
            stats,
            phase: SessionPhase::Idle,
        }
    }

    pub async fn run(
        mut self,
        queries: &[Query],
        max_results: usize,
        progress: &dyn ProgressSink,
    ) -> Result<SessionReport, SessionError> {
        let results_path = self.sink.location().to_path_buf();
        let total = queries.len();

        if total == 0 {
            bot_warn!("No queries to process");
            progress.emit(SessionEvent::NoQueries);
            self.transition(SessionPhase::Done, progress);
            return Ok(SessionReport::new(self.stats, results_path));
        }

        bot_info!("Starting session with {} queries, results to {:?}", total, results_path);
        progress.emit(SessionEvent::Started {
            total,
            results_path: results_path.display().to_string(),
        });

        for (offset, query) in queries.iter().enumerate() {
            let index = offset + 1;
            self.transition(SessionPhase::Processing { index, total }, progress);
            progress.emit(SessionEvent::QueryStarted {
                index,
                total,
                query: query.clone(),
            });

            let outcome = self.executor.execute(query, max_results, progress).await;
            let persisted = self.sink.append(query, &outcome.urls);
            self.stats.record(outcome.urls.len(), outcome.error_occurred());
            if let Err(source) = persisted {
                bot_error!("Aborting session: {}", source);
                return Err(SessionError::Persist {
                    query: query.clone(),
                    stats: self.stats,
                    source,
                });
            }
            progress.emit(SessionEvent::QueryFinished {
                index,
                url_count: outcome.urls.len(),
            });

            if index < total {
                let delay = self.pacer.query_delay();
                progress.emit(SessionEvent::CoolingDown { delay });
                bot_debug!("cooling down {:?} after query {}", delay, index);
                self.pacer.wait(delay).await;
            }
        }

        self.transition(SessionPhase::Summarizing, progress);
        let report = SessionReport::new(self.stats, results_path);
        bot_info!(
            "Session complete: {} queries, {} urls, {} errors",
            report.stats.queries_processed(),
            report.stats.urls_found(),
            report.stats.errors()
        );
        progress.emit(SessionEvent::Completed(report.clone()));
        self.transition(SessionPhase::Done, progress);
        Ok(report)
    }

    fn transition(&mut self, next: SessionPhase, progress: &dyn ProgressSink) {
        bot_debug!("session phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        progress.emit(SessionEvent::Phase(next));
    }
}
