use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::Article;
use crate::ingest::ArticleDraft;

#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestRequest {
    pub url: String,
    /// Skip the duplicate check and re-process the URL.
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub draft: ArticleDraft,
}

/// 409 body carrying the already-stored article, so a client can offer
/// "view existing" or "re-process anyway".
#[derive(Debug, Serialize, ToSchema)]
pub struct DuplicateResponse {
    pub error: String,
    pub existing: Article,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    pub url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
}
