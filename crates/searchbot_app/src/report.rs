//! Human-facing run output on stdout. Diagnostics go through the logger.

use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use searchbot_core::{SessionReport, SessionStats, BLOCK_SEPARATOR};
use searchbot_engine::{ProgressSink, SessionEvent};
use searchbot_logging::bot_warn;

pub struct ConsoleReporter {
    out: Mutex<Box<dyn Write + Send>>,
    /// Set after the first failed write; later failures stay quiet.
    write_failed: AtomicBool,
}

impl ConsoleReporter {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            write_failed: AtomicBool::new(false),
        }
    }

    /// Prints what was gathered before a fatal storage error.
    pub fn aborted(&self, stats: &SessionStats, results_path: &Path) {
        self.print(&format!(
            "\nSession aborted: results log {} is not writable",
            results_path.display()
        ));
        self.print(&SessionReport::new(*stats, results_path).to_string());
    }

    fn print(&self, line: &str) {
        // A panic while holding the lock leaves the writer itself usable.
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            if !self.write_failed.swap(true, Ordering::Relaxed) {
                bot_warn!("Progress output failed, further failures are silent: {}", err);
            }
        }
    }
}

impl ProgressSink for ConsoleReporter {
    fn emit(&self, event: SessionEvent) {
        match event {
            SessionEvent::Phase(_) => {}
            SessionEvent::NoQueries => {
                self.print("No queries to process. Add queries to the queries file.");
            }
            SessionEvent::Started {
                total,
                results_path,
            } => {
                self.print(&format!("Starting SearchBot with {total} queries"));
                self.print(&format!("Results will be saved to: {results_path}"));
                self.print(BLOCK_SEPARATOR);
            }
            SessionEvent::QueryStarted {
                index,
                total,
                query,
            } => {
                self.print(&format!("\n[{index}/{total}] Searching: '{query}'"));
            }
            SessionEvent::UrlFound { position, url } => {
                self.print(&format!("  [{position}] {url}"));
            }
            SessionEvent::QueryFailed { query, error } => {
                let label = if error.kind.is_transport() {
                    "HTTP error"
                } else {
                    "Search error"
                };
                self.print(&format!("{label} for '{query}': {error}"));
            }
            SessionEvent::QueryFinished { url_count, .. } => {
                self.print(&format!("Found {url_count} URLs"));
            }
            SessionEvent::CoolingDown { delay } => {
                self.print(&format!(
                    "Waiting {:.1}s before next query...",
                    delay.as_secs_f64()
                ));
            }
            SessionEvent::Completed(report) => {
                self.print(&format!("\n{report}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use searchbot_core::Query;
    use searchbot_engine::{FailureKind, SearchError};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn query_progress_is_printed_inline() {
        let buffer = SharedBuffer::default();
        let reporter = ConsoleReporter::new(Box::new(buffer.clone()));

        reporter.emit(SessionEvent::QueryStarted {
            index: 1,
            total: 2,
            query: Query::parse("foo").unwrap(),
        });
        reporter.emit(SessionEvent::UrlFound {
            position: 1,
            url: "http://a".to_string(),
        });
        reporter.emit(SessionEvent::QueryFailed {
            query: Query::parse("foo").unwrap(),
            error: SearchError::new(FailureKind::HttpStatus(429), "Too Many Requests"),
        });
        reporter.emit(SessionEvent::QueryFinished {
            index: 1,
            url_count: 1,
        });
        reporter.emit(SessionEvent::CoolingDown {
            delay: Duration::from_millis(2500),
        });

        assert_eq!(
            buffer.text(),
            "\n[1/2] Searching: 'foo'\n  [1] http://a\n\
             HTTP error for 'foo': http status 429: Too Many Requests\n\
             Found 1 URLs\nWaiting 2.5s before next query...\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_writes_are_flagged_not_fatal() {
        let reporter = ConsoleReporter::new(Box::new(BrokenPipe));
        assert!(!reporter.write_failed.load(Ordering::Relaxed));

        reporter.emit(SessionEvent::NoQueries);
        reporter.emit(SessionEvent::UrlFound {
            position: 1,
            url: "http://a".to_string(),
        });

        assert!(reporter.write_failed.load(Ordering::Relaxed));
    }

    #[test]
    fn poisoned_writer_still_prints() {
        let buffer = SharedBuffer::default();
        let reporter = Arc::new(ConsoleReporter::new(Box::new(buffer.clone())));
        let poisoner = Arc::clone(&reporter);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.out.lock().unwrap();
            panic!("poison the reporter lock");
        })
        .join();

        reporter.emit(SessionEvent::QueryFinished {
            index: 1,
            url_count: 3,
        });

        assert_eq!(buffer.text(), "Found 3 URLs\n");
        assert!(!reporter.write_failed.load(Ordering::Relaxed));
    }

    #[test]
    fn abort_prints_partial_summary() {
        let buffer = SharedBuffer::default();
        let reporter = ConsoleReporter::new(Box::new(buffer.clone()));
        let mut stats = SessionStats::new();
        stats.record(3, false);

        reporter.aborted(&stats, Path::new("results.txt"));

        let text = buffer.text();
        assert!(text.contains("Session aborted"));
        assert!(text.contains("Queries processed: 1"));
        assert!(text.contains("Total URLs found: 3"));
    }
}
