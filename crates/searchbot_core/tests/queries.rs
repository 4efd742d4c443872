use std::sync::Once;

use pretty_assertions::assert_eq;
use searchbot_core::{parse_queries, Query, DEFAULT_QUERIES_TEMPLATE};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(searchbot_logging::initialize_for_tests);
}

fn as_strs(queries: &[Query]) -> Vec<&str> {
    queries.iter().map(Query::as_str).collect()
}

#[test]
fn comments_and_blanks_are_dropped() {
    init_logging();
    let queries = parse_queries("foo\n# comment\n\nbar\n");
    assert_eq!(as_strs(&queries), vec!["foo", "bar"]);
}

#[test]
fn count_matches_valid_lines() {
    init_logging();
    let text = "alpha\n   \n#one\n  # two\nbeta\n\t\ngamma\n";
    assert_eq!(parse_queries(text).len(), 3);
}

#[test]
fn order_and_duplicates_are_preserved() {
    init_logging();
    let queries = parse_queries("b\na\nb\n");
    assert_eq!(as_strs(&queries), vec!["b", "a", "b"]);
}

#[test]
fn windows_line_endings_are_trimmed() {
    init_logging();
    let queries = parse_queries("rust lifetimes\r\n# skip\r\ntokio select\r\n");
    assert_eq!(as_strs(&queries), vec!["rust lifetimes", "tokio select"]);
}

#[test]
fn no_query_is_empty_or_a_comment() {
    init_logging();
    let text = " \n#\n # x\n\t#y\nok\n  spaced out  \n##\n";
    for query in parse_queries(text) {
        assert!(!query.as_str().is_empty());
        assert!(!query.as_str().starts_with('#'));
        assert_eq!(query.as_str(), query.as_str().trim());
    }
}

#[test]
fn default_template_holds_no_queries() {
    init_logging();
    assert!(DEFAULT_QUERIES_TEMPLATE
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#')));
    assert!(parse_queries(DEFAULT_QUERIES_TEMPLATE).is_empty());
}
