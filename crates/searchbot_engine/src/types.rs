use std::fmt;
use std::time::Duration;

use searchbot_core::{Query, SessionPhase, SessionReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SearchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus(u16),
    Timeout,
    Network,
    /// The provider served an anomaly/captcha page instead of results.
    Blocked,
    Parse,
    Other,
}

impl FailureKind {
    /// Transport and HTTP level failures, as opposed to everything else that
    /// can go wrong while querying.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FailureKind::HttpStatus(_)
                | FailureKind::Timeout
                | FailureKind::Network
                | FailureKind::Blocked
        )
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Blocked => write!(f, "blocked by provider"),
            FailureKind::Parse => write!(f, "unparseable response"),
            FailureKind::Other => write!(f, "search error"),
        }
    }
}

/// URLs gathered for one query, plus the failure that cut collection short.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryOutcome {
    pub urls: Vec<String>,
    pub error: Option<SearchError>,
}

impl QueryOutcome {
    pub fn error_occurred(&self) -> bool {
        self.error.is_some()
    }
}

/// Progress of a running session, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Phase(SessionPhase),
    /// Emitted when there is nothing to process; no `Completed` follows.
    NoQueries,
    Started {
        total: usize,
        results_path: String,
    },
    QueryStarted {
        index: usize,
        total: usize,
        query: Query,
    },
    /// `position` is 1-based within the query.
    UrlFound {
        position: usize,
        url: String,
    },
    QueryFailed {
        query: Query,
        error: SearchError,
    },
    QueryFinished {
        index: usize,
        url_count: usize,
    },
    CoolingDown {
        delay: Duration,
    },
    Completed(SessionReport),
}
