//! End-to-end "add article" workflow: duplicate check, extraction,
//! summarization, draft assembly. Persistence stays with the caller so that
//! nothing is stored until the owner explicitly confirms the draft.

pub mod dtos;
pub mod handlers;

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::DEFAULT_SUMMARY_PROMPT;
use crate::entities::Article;
use crate::extractor::{ExtractError, Extractor};
use crate::repositories::{ArticleRepositoryTrait, SettingsRepositoryTrait};
use crate::summarizer::{SummarizeError, Summarizer};
use crate::urls;

/// Pipeline stage at which a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Check,
    Extract,
    Summarize,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Check => "check",
            Stage::Extract => "extract",
            Stage::Summarize => "summarize",
        };
        write!(f, "{name}")
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("owner state lookup failed: {0}")]
    Check(#[source] anyhow::Error),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("summarization failed: {0}")]
    Summarize(#[from] SummarizeError),
}

impl IngestError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Check(_) => Stage::Check,
            Self::Extract(_) => Stage::Extract,
            Self::Summarize(_) => Stage::Summarize,
        }
    }
}

/// A validated, summarized article ready for the explicit persist step.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDraft {
    pub title: String,
    pub publication_name: Option<String>,
    pub source_url: String,
    pub full_text: String,
    pub summary: String,
}

#[derive(Debug)]
pub enum IngestOutcome {
    /// Ready to persist once the owner confirms.
    Draft(ArticleDraft),
    /// The owner already stored this URL; carries the stored article so the
    /// caller can offer "view existing" or "re-process anyway".
    Duplicate(Article),
}

pub struct IngestPipeline {
    articles: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
    settings: Arc<dyn SettingsRepositoryTrait + Send + Sync>,
    extractor: Arc<dyn Extractor>,
    summarizer: Arc<dyn Summarizer>,
}

impl IngestPipeline {
    pub fn new(
        articles: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
        settings: Arc<dyn SettingsRepositoryTrait + Send + Sync>,
        extractor: Arc<dyn Extractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            articles,
            settings,
            extractor,
            summarizer,
        }
    }

    /// Run the pipeline for one submitted URL.
    ///
    /// With `force` the duplicate check is skipped and the run restarts from
    /// extraction. A failed run persists nothing; re-running the same URL
    /// afterwards is an independent attempt.
    #[instrument(skip(self), fields(owner = %owner, url = %url, force))]
    pub async fn run(
        &self,
        owner: Uuid,
        url: &str,
        force: bool,
    ) -> Result<IngestOutcome, IngestError> {
        if !force {
            let existing = self
                .articles
                .list_for_owner(owner)
                .await
                .map_err(IngestError::Check)?;
            if let Some(duplicate) = urls::find_duplicate(url, &existing) {
                info!(existing_id = %duplicate.id, "url already stored for owner");
                return Ok(IngestOutcome::Duplicate(duplicate.clone()));
            }
        }

        let extracted = self.extractor.extract(url).await?;

        let prompt = self
            .settings
            .fetch(owner)
            .await
            .map_err(IngestError::Check)?
            .map(|settings| settings.summary_prompt)
            .unwrap_or_else(|| DEFAULT_SUMMARY_PROMPT.to_string());

        let summary = self
            .summarizer
            .summarize(&extracted.full_text, &prompt)
            .await?;

        info!(title = %extracted.title, "draft assembled");
        Ok(IngestOutcome::Draft(ArticleDraft {
            title: extracted.title,
            publication_name: extracted.publication_name,
            source_url: extracted.source_url,
            full_text: extracted.full_text,
            summary,
        }))
    }
}
