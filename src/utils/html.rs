// src/utils/html.rs

//! Text extraction helpers over `scraper` elements.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use sha2::{Digest, Sha256};

/// Select elements with `primary`, falling back to `fallback` when nothing matches.
pub fn select_with_fallback<'a>(
    document: &'a Html,
    primary: &Selector,
    fallback: &Selector,
) -> Vec<ElementRef<'a>> {
    let entries: Vec<_> = document.select(primary).collect();
    if entries.is_empty() {
        document.select(fallback).collect()
    } else {
        entries
    }
}

/// Fingerprint of an entry set: SHA-256 over the serialized markup of every element.
pub fn fingerprint(entries: &[ElementRef<'_>]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        hasher.update(entry.html().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// All text of an element, trimmed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Every non-blank text node of an element, trimmed and joined with `\n`.
pub fn text_lines(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of an element with `<br>` turned into line breaks.
///
/// Each resulting line is trimmed and the whole is trimmed.
pub fn text_with_breaks(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(el) if el.name() == "br" => raw.push('\n'),
            _ => {}
        }
    }

    raw.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Nearest preceding sibling element carrying the given class.
pub fn previous_sibling_with_class<'a>(
    element: &ElementRef<'a>,
    class: &str,
) -> Option<ElementRef<'a>> {
    element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().classes().any(|c| c == class))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(document: &'a Html, selector: &str) -> ElementRef<'a> {
        let sel = Selector::parse(selector).unwrap();
        document.select(&sel).next().unwrap()
    }

    #[test]
    fn test_select_with_fallback() {
        let document = Html::parse_fragment(r#"<div class="b">1</div><div class="b">2</div>"#);
        let primary = Selector::parse(".a").unwrap();
        let fallback = Selector::parse(".b").unwrap();
        assert_eq!(select_with_fallback(&document, &primary, &fallback).len(), 2);
        assert_eq!(select_with_fallback(&document, &fallback, &primary).len(), 2);
    }

    #[test]
    fn test_fingerprint_tracks_markup() {
        let a = Html::parse_fragment(r#"<p class="x">one</p>"#);
        let b = Html::parse_fragment(r#"<p class="x">one</p>"#);
        let c = Html::parse_fragment(r#"<p class="x">two</p>"#);
        let fa = fingerprint(&[first(&a, "p")]);
        assert_eq!(fa, fingerprint(&[first(&b, "p")]));
        assert_ne!(fa, fingerprint(&[first(&c, "p")]));
    }

    #[test]
    fn test_text_lines() {
        let document = Html::parse_fragment("<div>\n  <p> First </p>\n  <p>Second</p>\n</div>");
        assert_eq!(text_lines(&first(&document, "div")), "First\nSecond");
    }

    #[test]
    fn test_text_with_breaks() {
        let document =
            Html::parse_fragment("<div> Line one<br>Line <b>two</b><br/>  Line three </div>");
        assert_eq!(
            text_with_breaks(&first(&document, "div")),
            "Line one\nLine two\nLine three"
        );
    }

    #[test]
    fn test_previous_sibling_with_class() {
        let document = Html::parse_fragment(
            r#"<div class="game-name"><h3>Hades</h3></div><span></span><div class="card">x</div>"#,
        );
        let card = first(&document, ".card");
        let sibling = previous_sibling_with_class(&card, "game-name").unwrap();
        assert_eq!(element_text(&sibling), "Hades");
        assert!(previous_sibling_with_class(&card, "missing").is_none());
    }
}
