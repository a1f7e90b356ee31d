pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::ExtractedArticle;

use thiserror::Error;
use tracing::instrument;

use crate::fetcher::{self, FetchError};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("fetch failed: {0}")]
    Fetch(FetchError),

    #[error("no readable content found")]
    NotExtractable,
}

impl From<FetchError> for ExtractError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl(parse) => Self::InvalidUrl(parse.to_string()),
            FetchError::UnsupportedScheme(scheme) => {
                Self::InvalidUrl(format!("unsupported scheme '{scheme}'"))
            }
            other => Self::Fetch(other),
        }
    }
}

/// Capability seam over "fetch a URL and recover its readable content".
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractError>;
}

/// Production extractor backed by the real fetcher.
pub struct HttpExtractor;

#[async_trait::async_trait]
impl Extractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractError> {
        crate::extractor::extract(url).await
    }
}

/// Fetch `url` and recover its readable article content.
///
/// The returned `source_url` is the input verbatim even when the server
/// redirected; redirects only influence relative link resolution inside the
/// readability pass.
#[instrument(skip_all, fields(url = %url))]
pub async fn extract(url: &str) -> Result<ExtractedArticle, ExtractError> {
    let page = fetcher::fetch(url).await?;

    let parsed = reader::parse(&page.body, &page.final_url).ok_or(ExtractError::NotExtractable)?;

    Ok(ExtractedArticle {
        title: parsed.title,
        publication_name: parsed.publication_name,
        source_url: url.to_string(),
        full_text: parsed.full_text,
    })
}
