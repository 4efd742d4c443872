use std::fmt;

/// Written to the queries path when it does not exist yet. Every line is a
/// comment or blank, so loading it yields no queries.
pub const DEFAULT_QUERIES_TEMPLATE: &str = "\
# SearchBot Queries File
# Add your search queries here, one per line
# Lines starting with # are comments and will be ignored

# Example queries:
# python web scraping tutorial
# machine learning best practices
# REST API design patterns
";

/// A single search request: trimmed, non-empty, never a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Returns `None` for blank lines and lines starting with `#` after trimming.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keeps file order and duplicates.
pub fn parse_queries(text: &str) -> Vec<Query> {
    text.lines().filter_map(Query::parse).collect()
}
