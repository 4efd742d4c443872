use std::sync::Arc;

use futures_util::StreamExt;
use searchbot_core::Query;
use searchbot_logging::{bot_debug, bot_info, bot_warn};

use crate::{Pacer, ProgressSink, QueryOutcome, SearchProvider, SessionEvent};

/// Runs one query against a [`SearchProvider`], pausing after every URL and
/// turning provider failures into a recorded error instead of aborting.
#[derive(Clone)]
pub struct PacedSearchExecutor {
    provider: Arc<dyn SearchProvider>,
    pacer: Pacer,
}

impl PacedSearchExecutor {
    pub fn new(provider: Arc<dyn SearchProvider>, pacer: Pacer) -> Self {
        Self { provider, pacer }
    }

    pub async fn execute(
        &self,
        query: &Query,
        max_results: usize,
        sink: &dyn ProgressSink,
    ) -> QueryOutcome {
        let mut outcome = QueryOutcome::default();
        if max_results == 0 {
            return outcome;
        }

        let mut stream = self.provider.search(query.as_str(), max_results);
        while let Some(item) = stream.next().await {
            match item {
                Ok(url) => {
                    outcome.urls.push(url.clone());
                    sink.emit(SessionEvent::UrlFound {
                        position: outcome.urls.len(),
                        url,
                    });
                    let delay = self.pacer.after_url().await;
                    bot_debug!("paced {:?} after url {}", delay, outcome.urls.len());
                    if outcome.urls.len() >= max_results {
                        break;
                    }
                }
                Err(error) => {
                    if error.kind.is_transport() {
                        bot_warn!("HTTP failure for '{}': {}", query, error);
                    } else {
                        bot_warn!("Search failure for '{}': {}", query, error);
                    }
                    sink.emit(SessionEvent::QueryFailed {
                        query: query.clone(),
                        error: error.clone(),
                    });
                    outcome.error = Some(error);
                    break;
                }
            }
        }

        bot_info!("'{}' yielded {} urls", query, outcome.urls.len());
        outcome
    }
}
