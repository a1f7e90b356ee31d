use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::entities::Article;

const ARTICLE_COLUMNS: &str = "id, user_id, title, publication_name, source_url, \
                               full_text, summary, date_added, created_at, updated_at";

/// Fields required to persist a confirmed draft.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub user_id: Uuid,
    pub title: String,
    pub publication_name: Option<String>,
    pub source_url: String,
    pub full_text: String,
    pub summary: String,
}

/// Partial update. `None` leaves a column untouched; the outer `Some` on
/// `publication_name` distinguishes "set to null" from "leave alone".
#[derive(Debug, Clone, Default)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub publication_name: Option<Option<String>>,
    pub summary: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepositoryTrait {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Article>>;
    async fn find_by_id(&self, owner: Uuid, id: Uuid) -> Result<Option<Article>>;
    async fn create(&self, article: NewArticle) -> Result<Article>;
    async fn update(&self, owner: Uuid, id: Uuid, changes: ArticleUpdate)
    -> Result<Option<Article>>;
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct ArticleRepository {
    pool: Pool<Postgres>,
}

impl ArticleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepositoryTrait for ArticleRepository {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(articles)
    }

    async fn find_by_id(&self, owner: Uuid, id: Uuid) -> Result<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            WHERE user_id = $1 AND id = $2
            "#
        ))
        .bind(owner)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    async fn create(&self, article: NewArticle) -> Result<Article> {
        let created = sqlx::query_as::<_, Article>(&format!(
            r#"
            INSERT INTO articles
                (id, user_id, title, publication_name, source_url, full_text, summary)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(article.user_id)
        .bind(&article.title)
        .bind(&article.publication_name)
        .bind(&article.source_url)
        .bind(&article.full_text)
        .bind(&article.summary)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: ArticleUpdate,
    ) -> Result<Option<Article>> {
        let set_publication = changes.publication_name.is_some();
        let publication = changes.publication_name.flatten();

        let article = sqlx::query_as::<_, Article>(&format!(
            r#"
            UPDATE articles
            SET title = COALESCE($3, title),
                publication_name = CASE WHEN $4 THEN $5 ELSE publication_name END,
                summary = COALESCE($6, summary),
                updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(id)
        .bind(&changes.title)
        .bind(set_publication)
        .bind(&publication)
        .bind(&changes.summary)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM articles
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(owner)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
