use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::StatusCode;
use scraper::{Html, Selector};
use searchbot_logging::{bot_debug, bot_trace, bot_warn};
use url::Url;

use crate::{FailureKind, SearchError};

/// URLs in rank order. A failure ends the stream.
pub type UrlStream<'a> = BoxStream<'a, Result<String, SearchError>>;

/// A web search backend.
///
/// Implementations should fetch lazily: consumers pace themselves between
/// items and may stop pulling early.
pub trait SearchProvider: Send + Sync {
    /// Yields at most `limit` URLs for `query`.
    fn search<'a>(&'a self, query: &'a str, limit: usize) -> UrlStream<'a>;
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Minimum page budget per query; raised for large limits, see
    /// [`SearchSettings::page_budget`].
    pub max_pages: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_pages: 5,
        }
    }
}

/// Fewest organic results a full DuckDuckGo HTML page carries.
const LINKS_PER_PAGE: usize = 10;

impl SearchSettings {
    /// Pages that may be fetched while collecting `limit` URLs.
    pub fn page_budget(&self, limit: usize) -> usize {
        self.max_pages.max(limit.div_ceil(LINKS_PER_PAGE))
    }
}

/// Scrapes the JavaScript-free DuckDuckGo results page.
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl DuckDuckGoProvider {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn fetch_page(&self, query: &str, offset: usize) -> Result<Vec<String>, SearchError> {
        let offset = offset.to_string();
        let url = Url::parse_with_params(
            &self.settings.endpoint,
            &[("q", query), ("s", offset.as_str())],
        )
        .map_err(|err| SearchError::new(FailureKind::Other, err.to_string()))?;
        bot_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        // DuckDuckGo answers throttled clients with a 202 anomaly page.
        if status == StatusCode::ACCEPTED {
            return Err(SearchError::new(
                FailureKind::Blocked,
                "provider returned an anomaly page",
            ));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let links = parse_result_links(&body)?;
        bot_trace!("page at offset {} held {} links", offset, links.len());
        Ok(links)
    }
}

#[derive(Default)]
struct PageCursor {
    offset: usize,
    pages_fetched: usize,
    buffered: VecDeque<String>,
    seen: HashSet<String>,
    yielded: usize,
}

impl SearchProvider for DuckDuckGoProvider {
    fn search<'a>(&'a self, query: &'a str, limit: usize) -> UrlStream<'a> {
        let page_budget = self.settings.page_budget(limit);
        stream::unfold(Some(PageCursor::default()), move |state| async move {
            let Some(mut cursor) = state else {
                return None;
            };
            loop {
                if cursor.yielded >= limit {
                    return None;
                }
                if let Some(url) = cursor.buffered.pop_front() {
                    cursor.yielded += 1;
                    return Some((Ok(url), Some(cursor)));
                }
                if cursor.pages_fetched >= page_budget {
                    bot_warn!(
                        "'{}': stopped after {} pages with {} of {} urls",
                        query,
                        page_budget,
                        cursor.yielded,
                        limit
                    );
                    return None;
                }
                match self.fetch_page(query, cursor.offset).await {
                    Ok(links) => {
                        cursor.pages_fetched += 1;
                        cursor.offset += links.len();
                        let before = cursor.buffered.len();
                        for link in links {
                            if cursor.seen.insert(link.clone()) {
                                cursor.buffered.push_back(link);
                            }
                        }
                        if cursor.buffered.len() == before {
                            return None;
                        }
                    }
                    Err(err) => return Some((Err(err), None)),
                }
            }
        })
        .boxed()
    }
}

fn parse_result_links(html: &str) -> Result<Vec<String>, SearchError> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let document = Html::parse_document(html);

    let links = document
        .select(&result_sel)
        .filter(|result| !result.value().classes().any(|class| class == "result--ad"))
        .filter_map(|result| result.select(&link_sel).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(resolve_href)
        .collect();
    Ok(links)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|err| SearchError::new(FailureKind::Parse, err.to_string()))
}

/// Unwraps DuckDuckGo redirect links and keeps only absolute http(s) URLs.
fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_string()
    };
    let parsed = Url::parse(&absolute).ok()?;

    if parsed
        .host_str()
        .is_some_and(|host| host == "duckduckgo.com" || host.ends_with(".duckduckgo.com"))
    {
        if parsed.path() != "/l/" {
            return None;
        }
        let target = parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())?;
        return is_web_url(&target).then_some(target);
    }

    is_web_url(&absolute).then_some(absolute)
}

/// `Url::parse` silently drops tabs and newlines, so they are rejected here:
/// every yielded URL must fit on one results-log line.
fn is_web_url(candidate: &str) -> bool {
    if candidate.chars().any(char::is_control) {
        bot_warn!("dropping result link with control characters: {:?}", candidate);
        return false;
    }
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return SearchError::new(FailureKind::Parse, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}
