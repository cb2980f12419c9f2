// src/utils/url.rs

//! Listing URL templates.

use url::Url;

use crate::error::{AppError, Result};

/// Append path segments to a base URL and set the `page` query.
fn paged_url(base_url: &str, segments: &[&str], page: u32) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| AppError::config(format!("Cannot append path to {base_url}")))?
        .pop_if_empty()
        .extend(segments);
    url.query_pairs_mut()
        .clear()
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// URL of one page of a user's games with the given status slug.
///
/// # Examples
/// ```
/// use backlogger::utils::url::status_page_url;
///
/// assert_eq!(
///     status_page_url("https://backloggd.com", "alice", "played", 2)
///         .unwrap()
///         .as_str(),
///     "https://backloggd.com/u/alice/games/added:desc/type:played?page=2"
/// );
/// ```
pub fn status_page_url(
    base_url: &str,
    username: &str,
    status_slug: &str,
    page: u32,
) -> Result<Url> {
    let type_segment = format!("type:{status_slug}");
    paged_url(
        base_url,
        &["u", username, "games", "added:desc", &type_segment],
        page,
    )
}

/// URL of one page of a user's reviews.
pub fn reviews_page_url(base_url: &str, username: &str, page: u32) -> Result<Url> {
    paged_url(base_url, &["u", username, "reviews"], page)
}
