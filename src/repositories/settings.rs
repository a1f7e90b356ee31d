use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::entities::{Settings, SettingsDefault};

/// Prompt rows are created lazily on first write. A missing row means the
/// owner has never saved anything and callers fall back to the application
/// default.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepositoryTrait {
    async fn fetch(&self, owner: Uuid) -> Result<Option<Settings>>;
    async fn fetch_default(&self, owner: Uuid) -> Result<Option<SettingsDefault>>;
    async fn save_prompt(&self, owner: Uuid, prompt: &str) -> Result<Settings>;
    async fn save_default_prompt(&self, owner: Uuid, prompt: &str) -> Result<SettingsDefault>;
}

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    async fn fetch(&self, owner: Uuid) -> Result<Option<Settings>> {
        let settings = sqlx::query_as::<_, Settings>(
            r#"
            SELECT user_id, summary_prompt, updated_at
            FROM settings
            WHERE user_id = $1
            "#,
        )
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    async fn fetch_default(&self, owner: Uuid) -> Result<Option<SettingsDefault>> {
        let default = sqlx::query_as::<_, SettingsDefault>(
            r#"
            SELECT user_id, default_prompt, updated_at
            FROM settings_defaults
            WHERE user_id = $1
            "#,
        )
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(default)
    }

    async fn save_prompt(&self, owner: Uuid, prompt: &str) -> Result<Settings> {
        let settings = sqlx::query_as::<_, Settings>(
            r#"
            INSERT INTO settings (user_id, summary_prompt)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET summary_prompt = EXCLUDED.summary_prompt, updated_at = NOW()
            RETURNING user_id, summary_prompt, updated_at
            "#,
        )
        .bind(owner)
        .bind(prompt)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }

    async fn save_default_prompt(&self, owner: Uuid, prompt: &str) -> Result<SettingsDefault> {
        let default = sqlx::query_as::<_, SettingsDefault>(
            r#"
            INSERT INTO settings_defaults (user_id, default_prompt)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET default_prompt = EXCLUDED.default_prompt, updated_at = NOW()
            RETURNING user_id, default_prompt, updated_at
            "#,
        )
        .bind(owner)
        .bind(prompt)
        .fetch_one(&self.pool)
        .await?;

        Ok(default)
    }
}
