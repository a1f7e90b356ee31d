//! HTML to readable text. Readability does the heavy lifting; a selector
//! based fallback covers pages it cannot handle.

use readability::extractor;
use scraper::{Html, Selector};
use url::Url;

use crate::extractor::model::normalize_whitespace;

/// Content below this many characters is treated as navigation or
/// boilerplate by the fallback selectors.
const MIN_CONTENT_CHARS: usize = 100;

#[derive(Debug)]
pub struct ParsedPage {
    pub title: String,
    pub publication_name: Option<String>,
    pub full_text: String,
}

/// Pull title, publication name and body text out of an HTML document.
/// Returns `None` when no readable text can be found at all.
pub fn parse(html: &str, base: &Url) -> Option<ParsedPage> {
    let (title, text) = readability_parse(html, base)
        .filter(|(_, text)| !text.trim().is_empty())
        .or_else(|| fallback_parse(html))?;

    let full_text = normalize_whitespace(&text);
    if full_text.is_empty() {
        return None;
    }

    let title = match title.trim() {
        "" => "Untitled".to_string(),
        t => t.to_string(),
    };

    Some(ParsedPage {
        title,
        publication_name: publication_name(html, base),
        full_text,
    })
}

fn readability_parse(html: &str, base: &Url) -> Option<(String, String)> {
    extractor::extract(&mut html.as_bytes(), base)
        .ok()
        .map(|product| (product.title, product.text))
}

/// og:site_name when the page declares one, otherwise the host with any
/// leading "www." removed.
fn publication_name(html: &str, base: &Url) -> Option<String> {
    let document = Html::parse_document(html);
    if let Ok(selector) = Selector::parse("meta[property='og:site_name']")
        && let Some(element) = document.select(&selector).next()
        && let Some(content) = element.value().attr("content")
        && !content.trim().is_empty()
    {
        return Some(content.trim().to_string());
    }

    base.host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
}

fn fallback_parse(html: &str) -> Option<(String, String)> {
    let document = Html::parse_document(html);
    let text = main_content_text(&document);
    if text.trim().is_empty() {
        return None;
    }
    Some((fallback_title(&document).unwrap_or_default(), text))
}

fn fallback_title(document: &Html) -> Option<String> {
    if let Ok(selector) = Selector::parse("meta[property='og:title']")
        && let Some(element) = document.select(&selector).next()
        && let Some(content) = element.value().attr("content")
        && !content.trim().is_empty()
    {
        return Some(content.trim().to_string());
    }

    for selector_str in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }

    None
}

fn main_content_text(document: &Html) -> String {
    let content_selectors = [
        "article",
        "main",
        "[role='main']",
        ".content",
        ".post",
        ".article",
        "#content",
        "#main",
        ".entry-content",
    ];

    for selector_str in content_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let text = element.text().collect::<String>();
                if text.trim().len() > MIN_CONTENT_CHARS {
                    return text;
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("body")
        && let Some(body) = document.select(&selector).next()
    {
        return body.text().collect::<String>();
    }

    String::new()
}
