use std::fs;

use url::Url;

use crate::extractor::reader;

fn parse_fixture(name: &str, base: &str) -> Option<reader::ParsedPage> {
    let html = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("failed to read test fixture");
    reader::parse(&html, &Url::parse(base).unwrap())
}

#[test]
fn parses_article_fixture() {
    let parsed = parse_fixture("article.html", "https://example.com/article").unwrap();

    assert!(parsed.title.contains("Sample Article"));
    assert_eq!(parsed.publication_name, Some("News Site".to_string()));
    assert!(parsed.full_text.contains("first paragraph"));
    assert!(parsed.full_text.contains("second paragraph"));
}

#[test]
fn normalizes_whitespace_in_extracted_text() {
    let parsed = parse_fixture("article.html", "https://example.com/article").unwrap();

    assert!(!parsed.full_text.contains("\n\n\n"));
    assert!(!parsed.full_text.starts_with(char::is_whitespace));
    assert!(!parsed.full_text.ends_with(char::is_whitespace));
}

#[test]
fn empty_page_yields_nothing() {
    assert!(parse_fixture("empty.html", "https://example.com/empty").is_none());
}

#[test]
fn publication_falls_back_to_host_without_www() {
    let html = format!(
        "<!DOCTYPE html><html><head><title>Post</title></head><body><article><p>{}</p></article></body></html>",
        "Plenty of readable prose so the content selectors accept this page. ".repeat(10)
    );
    let parsed = reader::parse(&html, &Url::parse("https://www.example.com/post").unwrap()).unwrap();

    assert_eq!(parsed.publication_name, Some("example.com".to_string()));
}

#[test]
fn missing_title_defaults_to_untitled() {
    let html = format!(
        "<html><body><article><p>{}</p></article></body></html>",
        "Body text without any title element anywhere on the page at all. ".repeat(10)
    );
    let parsed = reader::parse(&html, &Url::parse("https://example.com/x").unwrap()).unwrap();

    assert_eq!(parsed.title, "Untitled");
}

#[test]
fn malformed_html_is_handled() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content";
    if let Some(parsed) = reader::parse(html, &Url::parse("https://example.com/broken").unwrap()) {
        assert_eq!(parsed.title, "Broken");
        assert!(parsed.full_text.contains("Unclosed tags"));
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_never_panics(html in ".*", path in "[a-z]{1,12}") {
            let base = Url::parse(&format!("https://example.com/{path}")).unwrap();
            let _ = reader::parse(&html, &base);
        }

        #[test]
        fn parsed_text_is_never_blank(html in ".*") {
            let base = Url::parse("https://example.com/p").unwrap();
            if let Some(parsed) = reader::parse(&html, &base) {
                prop_assert!(!parsed.full_text.trim().is_empty());
                prop_assert!(!parsed.title.trim().is_empty());
            }
        }
    }
}
