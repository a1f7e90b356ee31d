use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use tracing::instrument;
use url::Url;

use crate::fetcher::{decode::build_page, errors::FetchError, types::Page};

/// Bodies past this size are rejected rather than truncated.
const MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;
const USER_AGENT: &str = "ShelfBot/0.1 (+https://shelf.example.com)";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers
        })
        .build()
        .expect("failed to build HTTP client")
});

/// Fetch an article page and decode its body to UTF-8.
///
/// Accepts only http/https URLs and HTML responses, follows up to ten
/// redirects, and refuses bodies over five mebibytes whether or not the
/// server announced a Content-Length.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<Page, FetchError> {
    let parsed = Url::parse(url)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(parsed.scheme().to_string()));
    }

    let response = HTTP_CLIENT
        .get(parsed)
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_BYTES
    {
        return Err(FetchError::BodyTooLarge {
            limit: MAX_BODY_BYTES,
        });
    }

    let final_url = response.url().clone();
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("text/html")
        .to_string();
    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Body(e.to_string()))?;
    if body_bytes.len() as u64 > MAX_BODY_BYTES {
        return Err(FetchError::BodyTooLarge {
            limit: MAX_BODY_BYTES,
        });
    }

    build_page(final_url, status, body_bytes, &content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_http_schemes_without_network() {
        let result = fetch("ftp://example.com/file.html").await;
        assert!(matches!(result, Err(FetchError::UnsupportedScheme(s)) if s == "ftp"));

        let result = fetch("mailto:me@example.com").await;
        assert!(matches!(result, Err(FetchError::UnsupportedScheme(_))));
    }

    #[tokio::test]
    async fn rejects_unparseable_urls() {
        let result = fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
