/// Per-session counters. Owned by whoever drives the session; only
/// [`SessionStats::record`] mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    queries_processed: usize,
    urls_found: usize,
    errors: usize,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one finished query.
    pub fn record(&mut self, url_count: usize, errored: bool) {
        self.queries_processed += 1;
        self.urls_found += url_count;
        if errored {
            self.errors += 1;
        }
    }

    pub fn queries_processed(&self) -> usize {
        self.queries_processed
    }

    pub fn urls_found(&self) -> usize {
        self.urls_found
    }

    pub fn errors(&self) -> usize {
        self.errors
    }
}
