// src/services/fetcher.rs

//! Rate-limited page fetching.
//!
//! Transport errors never escape this module: they are logged and turned into
//! `None`, which callers treat as the end of pagination for that source.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::utils::html;

/// Title markers of an anti-bot challenge page.
const CHALLENGE_MARKERS: [&str; 2] = ["Just a moment", "Attention Required"];

/// Title marker of a forced login page.
const LOGIN_MARKER: &str = "Login";

/// Anything that can return the body of a GET request.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// GET `url` and return the decoded body. Non-2xx responses are errors.
    async fn get_text(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl PageSource for reqwest::Client {
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).send().await?.error_for_status()?;
        // reqwest decodes as UTF-8 unless the response declares a charset
        Ok(response.text().await?)
    }
}

/// A successful response whose content is a refusal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftBlock {
    /// Anti-bot challenge interstitial
    Challenge,
    /// Redirected to the login form
    LoginRedirect,
}

impl SoftBlock {
    /// Operator guidance for this block.
    pub fn guidance(self) -> &'static str {
        match self {
            SoftBlock::Challenge => {
                "Challenge page detected! Your cookie might be invalid or expired."
            }
            SoftBlock::LoginRedirect => "Redirected to Login. Your cookie is invalid.",
        }
    }
}

/// A fetched and parsed listing page.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parse a response body.
    pub fn parse(body: &str) -> Self {
        Self {
            document: Html::parse_document(body),
        }
    }

    /// Trimmed `<title>` text, or "No Title".
    pub fn title(&self) -> String {
        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| self.document.select(&sel).next())
            .map(|el| html::element_text(&el))
            .unwrap_or_default();

        if title.is_empty() {
            "No Title".to_string()
        } else {
            title
        }
    }

    /// Classify the page as a soft block from its title.
    pub fn soft_block(&self) -> Option<SoftBlock> {
        let title = self.title();
        if CHALLENGE_MARKERS.iter().any(|m| title.contains(m)) {
            Some(SoftBlock::Challenge)
        } else if title.contains(LOGIN_MARKER) {
            Some(SoftBlock::LoginRedirect)
        } else {
            None
        }
    }

    /// Entries matching `primary`, or `fallback` when `primary` matches nothing.
    pub fn select_entries(&self, primary: &Selector, fallback: &Selector) -> Vec<ElementRef<'_>> {
        html::select_with_fallback(&self.document, primary, fallback)
    }
}

/// Fetches pages one at a time with a fixed pause after each request.
pub struct Fetcher<S> {
    source: S,
    delay: Duration,
}

impl<S: PageSource> Fetcher<S> {
    /// Create a fetcher that sleeps `delay` after every request.
    pub fn new(source: S, delay: Duration) -> Self {
        Self { source, delay }
    }

    /// The underlying page source.
    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and parse a page. Errors are logged and yield `None`.
    pub async fn fetch(&self, url: &str) -> Option<Page> {
        log::info!("Fetching: {}", url);
        let result = self.source.get_text(url).await;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match result {
            Ok(body) => Some(Page::parse(&body)),
            Err(e) => {
                log::error!("Error fetching {}: {}", url, e);
                if is_forbidden(&e) {
                    log::warn!(
                        "403 Forbidden: the site is blocking requests. Provide your browser \
                         cookie with --cookie \"<cookie string>\" or --cookie cookies.txt \
                         (copy it from the Cookie request header in your browser's dev tools)."
                    );
                }
                None
            }
        }
    }
}

fn is_forbidden(error: &AppError) -> bool {
    matches!(
        error,
        AppError::Http(e) if e.status() == Some(reqwest::StatusCode::FORBIDDEN)
    )
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory page source for scraper tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::PageSource;
    use crate::error::{AppError, Result};

    /// Serves canned bodies by URL and records every request.
    #[derive(Default)]
    pub struct StaticSource {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticSource {
        pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
            self.pages.insert(url.to_string(), body.into());
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for StaticSource {
        async fn get_text(&self, url: &str) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::validation(format!("404 for {url}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StaticSource;
    use super::*;

    fn page_with_title(title: &str) -> Page {
        Page::parse(&format!(
            "<html><head><title> {title} </title></head><body></body></html>"
        ))
    }

    #[test]
    fn test_title() {
        assert_eq!(page_with_title("Alice's Games").title(), "Alice's Games");
        assert_eq!(Page::parse("<p>no head</p>").title(), "No Title");
    }

    #[test]
    fn test_soft_block() {
        assert_eq!(
            page_with_title("Just a moment...").soft_block(),
            Some(SoftBlock::Challenge)
        );
        assert_eq!(
            page_with_title("Attention Required! | Cloudflare").soft_block(),
            Some(SoftBlock::Challenge)
        );
        assert_eq!(
            page_with_title("Login | Backloggd").soft_block(),
            Some(SoftBlock::LoginRedirect)
        );
        assert_eq!(page_with_title("alice's Games").soft_block(), None);
    }

    #[tokio::test]
    async fn test_fetch_maps_errors_to_none() {
        let source = StaticSource::default().with_page("https://x.test/a", "<title>A</title>");
        let fetcher = Fetcher::new(source, Duration::ZERO);

        let page = fetcher.fetch("https://x.test/a").await;
        assert_eq!(page.map(|p| p.title()), Some("A".to_string()));
        assert!(fetcher.fetch("https://x.test/missing").await.is_none());
        assert_eq!(
            fetcher.source().requests(),
            vec!["https://x.test/a", "https://x.test/missing"]
        );
    }
}
