// src/utils/http.rs

//! HTTP client and session cookie utilities.

use std::fs;
use std::path::Path;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Prefix curl and browser exporters put on HttpOnly cookie lines.
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Create the HTTP client with browser-like headers and an optional cookie.
pub fn create_client(config: &CrawlerConfig, cookie: Option<&str>) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(default_headers(config, cookie)?)
        .build()?;
    Ok(client)
}

fn default_headers(config: &CrawlerConfig, cookie: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));

    let referer = HeaderValue::from_str(&config.referer)
        .map_err(|e| AppError::config(format!("Invalid referer '{}': {e}", config.referer)))?;
    headers.insert(header::REFERER, referer);

    if let Some(cookie) = cookie {
        match HeaderValue::from_str(cookie) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(header::COOKIE, value);
            }
            Err(e) => log::warn!("Ignoring cookie that is not a valid header value: {}", e),
        }
    }

    Ok(headers)
}

/// Turn the `--cookie` argument into a `Cookie` header value.
///
/// An existing file is read as a Netscape cookie jar; anything else is used
/// verbatim. Failures are logged and yield `None`.
pub fn resolve_cookie(arg: Option<&str>) -> Option<String> {
    let arg = arg.map(str::trim).filter(|s| !s.is_empty())?;
    let path = Path::new(arg);

    if path.is_file() {
        log::info!("Reading cookies from file: {}", path.display());
        return match parse_cookie_file(path) {
            Ok(cookie) if cookie.is_empty() => {
                log::warn!("No cookies found in {}", path.display());
                None
            }
            Ok(cookie) => Some(cookie),
            Err(e) => {
                log::error!("Error parsing cookie file: {}", e);
                None
            }
        };
    }

    Some(arg.to_string())
}

/// Read a Netscape/Mozilla cookie jar into `name=value; name=value` form.
pub fn parse_cookie_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::cookie(format!("{}: {e}", path.display())))?;
    Ok(parse_cookie_jar(&content))
}

/// Parse cookie jar text. Lines need at least seven tab-separated fields.
///
/// Lines starting with `#` are comments, except `#HttpOnly_` lines: exporters
/// mark HttpOnly cookies (the session cookie among them) that way, so the
/// prefix is stripped and the line parsed as a cookie.
pub fn parse_cookie_jar(content: &str) -> String {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let line = line.strip_prefix(HTTP_ONLY_PREFIX).unwrap_or(line);
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 7 {
                return None;
            }
            Some(format!("{}={}", fields[5], fields[6]))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
