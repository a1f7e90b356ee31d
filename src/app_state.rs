use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::extractor::{Extractor, HttpExtractor};
use crate::ingest::IngestPipeline;
use crate::repositories::{
    ArticleRepository, ArticleRepositoryTrait, SettingsRepository, SettingsRepositoryTrait,
    UserRepository, UserRepositoryTrait,
};
use crate::summarizer::{OpenAiSummarizer, Summarizer};

/// Shared handler state: repositories, the ingestion pipeline, and the pool
/// itself for health checks.
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepositoryTrait + Send + Sync>,
    pub article_repo: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
    pub settings_repo: Arc<dyn SettingsRepositoryTrait + Send + Sync>,
    pub extractor: Arc<dyn Extractor>,
    pub summarizer: Arc<dyn Summarizer>,
    pub pipeline: Arc<IngestPipeline>,
    pub db_pool: PgPool,
}

impl AppState {
    pub fn new(
        db_pool: PgPool,
        user_repo: Arc<dyn UserRepositoryTrait + Send + Sync>,
        article_repo: Arc<dyn ArticleRepositoryTrait + Send + Sync>,
        settings_repo: Arc<dyn SettingsRepositoryTrait + Send + Sync>,
        extractor: Arc<dyn Extractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let pipeline = Arc::new(IngestPipeline::new(
            article_repo.clone(),
            settings_repo.clone(),
            extractor.clone(),
            summarizer.clone(),
        ));
        Self {
            user_repo,
            article_repo,
            settings_repo,
            extractor,
            summarizer,
            pipeline,
            db_pool,
        }
    }

    /// Production wiring: Postgres repositories, the HTTP extractor and the
    /// OpenAI-compatible summarizer.
    pub fn from_config(db_pool: PgPool, config: &Config) -> Self {
        Self::new(
            db_pool.clone(),
            Arc::new(UserRepository::new(db_pool.clone())),
            Arc::new(ArticleRepository::new(db_pool.clone())),
            Arc::new(SettingsRepository::new(db_pool)),
            Arc::new(HttpExtractor),
            Arc::new(OpenAiSummarizer::from_config(config)),
        )
    }
}
