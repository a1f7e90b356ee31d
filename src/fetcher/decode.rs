//! Charset sniffing and decoding of fetched bodies.

use std::sync::LazyLock;

use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use url::Url;

use crate::fetcher::{
    errors::FetchError,
    types::{Charset, Page},
};

/// Only the head of the document is scanned for <meta> charset declarations.
const SNIFF_WINDOW: usize = 4096;

static HEADER_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn build_page(
    final_url: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<Page, FetchError> {
    let charset = detect_charset(content_type, &body_bytes);
    let body = decode_body(&body_bytes, &charset)?;

    Ok(Page {
        final_url,
        status,
        body,
        charset,
        fetched_at: Utc::now(),
    })
}

/// Precedence: Content-Type header, then <meta> declarations in the first
/// 4KB, then chardetng's statistical guess.
fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    if let Some(encoding) = labeled_encoding(&HEADER_CHARSET_REGEX, content_type) {
        return Charset::from_encoding(encoding);
    }

    let window = &body_bytes[..body_bytes.len().min(SNIFF_WINDOW)];
    let head = String::from_utf8_lossy(window);
    for regex in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(encoding) = labeled_encoding(regex, &head) {
            return Charset::from_encoding(encoding);
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(window, false);
    Charset::from_encoding(detector.guess(None, true))
}

fn labeled_encoding(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn decode_body(body_bytes: &[u8], charset: &Charset) -> Result<String, FetchError> {
    let encoding = charset.encoding();
    let (decoded, _, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        return Err(FetchError::Decode(encoding.name().to_string()));
    }
    Ok(decoded.into_owned())
}
