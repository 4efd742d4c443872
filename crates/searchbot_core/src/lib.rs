//! Searchbot core: query model, session accounting and log formatting. No I/O.
mod block;
mod query;
mod session;
mod stats;

pub use block::{format_block, BLOCK_SEPARATOR, TIMESTAMP_FORMAT};
pub use query::{parse_queries, Query, DEFAULT_QUERIES_TEMPLATE};
pub use session::{SessionPhase, SessionReport};
pub use stats::SessionStats;
