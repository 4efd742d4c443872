use std::fmt::Write;

use crate::Query;

/// `chrono`-compatible format of the timestamp line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Line between a block header and its URLs.
pub const BLOCK_SEPARATOR: &str = "--------------------------------------------------";

/// Renders one self-contained results-log block:
///
/// ```text
///
/// # Query: <query>
/// # Timestamp: <timestamp>
/// # Results: <n> URLs
/// --------------------------------------------------
/// <url>...
///
/// ```
pub fn format_block(query: &Query, timestamp: &str, urls: &[String]) -> String {
    let capacity = 128 + query.as_str().len() + urls.iter().map(|u| u.len() + 1).sum::<usize>();
    let mut block = String::with_capacity(capacity);
    let _ = writeln!(block);
    let _ = writeln!(block, "# Query: {query}");
    let _ = writeln!(block, "# Timestamp: {timestamp}");
    let _ = writeln!(block, "# Results: {} URLs", urls.len());
    let _ = writeln!(block, "{BLOCK_SEPARATOR}");
    for url in urls {
        let _ = writeln!(block, "{url}");
    }
    let _ = writeln!(block);
    block
}
