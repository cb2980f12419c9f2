// src/utils/text.rs

//! Title, slug and frontmatter text helpers.

use regex::Regex;

/// Divisor applied to the 0-10 `data-rating` attribute.
const DATA_RATING_DIVISOR: f64 = 2.0;

/// Divisor applied to a star bar's percentage width.
const STAR_WIDTH_DIVISOR: f64 = 20.0;

/// Slug used when a title has no slug-safe characters at all.
const FALLBACK_SLUG: &str = "untitled";

/// Normalize a title into a join key: ASCII alphanumerics only, lowercased.
///
/// # Examples
/// ```
/// use backlogger::utils::text::normalize_title;
///
/// assert_eq!(normalize_title("Final Fantasy VII"), "finalfantasyvii");
/// ```
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Convert a title into a folder-safe slug.
///
/// Drops everything but word characters, whitespace and hyphens, lowercases,
/// then joins whitespace-separated runs with `-`.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let slug = kept.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Quote a value for the frontmatter block, escaping backslashes and quotes.
pub fn escape_yaml(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Format a rating so it always carries a decimal point (`4.0`, `3.5`).
pub fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        rating.to_string()
    }
}

/// Rating from the 0-10 `data-rating` attribute.
pub fn data_rating(value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v / DATA_RATING_DIVISOR),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Unparseable rating attribute '{}': {}", value, e);
            None
        }
    }
}

/// Rating from a star bar style such as `width: 80%`.
pub fn star_rating(style: &str) -> Option<f64> {
    let pattern = Regex::new(r"width:\s*([\d.]+)%").ok()?;
    let caps = pattern.captures(style)?;
    let width = caps.get(1)?.as_str();

    match width.parse::<f64>() {
        Ok(w) => Some(w / STAR_WIDTH_DIVISOR),
        Err(e) => {
            log::warn!("Could not parse rating style '{}': {}", style, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_insensitive() {
        assert_eq!(
            normalize_title("Final Fantasy VII"),
            normalize_title("final-fantasy-vii!!")
        );
        assert_eq!(normalize_title("The Witcher 3"), "thewitcher3");
    }

    #[test]
    fn test_normalize_title_idempotent() {
        for title in ["Final Fantasy VII", "NieR:Automata™", "  ", "Pokémon Red"] {
            let once = normalize_title(title);
            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(
            slugify("Chrono Trigger: Director's Cut"),
            "chrono-trigger-directors-cut"
        );
        assert_eq!(slugify("Half-Life  2"), "half-life-2");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn test_slugify_is_filesystem_safe() {
        let slug = slugify("Ratchet & Clank: Rift Apart / PS5 \"Edition\"");
        assert!(
            slug.chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(slug, slugify("Ratchet & Clank: Rift Apart / PS5 \"Edition\""));
    }

    #[test]
    fn test_escape_yaml() {
        assert_eq!(escape_yaml("Plain"), "\"Plain\"");
        assert_eq!(escape_yaml("Say \"hi\""), "\"Say \\\"hi\\\"\"");
        assert_eq!(escape_yaml(r"C:\games"), "\"C:\\\\games\"");
        assert_eq!(escape_yaml(""), "\"\"");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(4.0), "4.0");
        assert_eq!(format_rating(0.0), "0.0");
        assert_eq!(format_rating(3.5), "3.5");
        assert_eq!(format_rating(4.25), "4.25");
    }

    #[test]
    fn test_data_rating() {
        assert_eq!(data_rating("8"), Some(4.0));
        assert_eq!(data_rating("7"), Some(3.5));
        assert_eq!(data_rating(""), None);
        assert_eq!(data_rating("n/a"), None);
    }

    #[test]
    fn test_star_rating() {
        assert_eq!(star_rating("width: 70%"), Some(3.5));
        assert_eq!(star_rating("width:100%;"), Some(5.0));
        assert_eq!(star_rating("color: red"), None);
        assert_eq!(star_rating("width: 1.2.3%"), None);
    }
}
