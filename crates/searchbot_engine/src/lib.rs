//! Searchbot engine: query loading, paced searching and result persistence.
mod executor;
mod pacing;
mod progress;
mod search;
mod session;
mod sink;
mod source;
mod types;

pub use executor::PacedSearchExecutor;
pub use pacing::{DelayRange, Pacer, PacingSettings, Sleeper, TokioSleeper};
pub use progress::{NullProgressSink, ProgressSink};
pub use search::{DuckDuckGoProvider, SearchProvider, SearchSettings, UrlStream};
pub use session::{SessionError, SessionRunner};
pub use sink::{FileResultSink, PersistError, ResultSink, TimestampFn};
pub use source::{QuerySource, SourceError};
pub use types::{FailureKind, QueryOutcome, SearchError, SessionEvent};
