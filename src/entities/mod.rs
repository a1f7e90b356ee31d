use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A captured piece of content owned by exactly one user.
///
/// `source_url` is stored verbatim as submitted; canonicalization happens
/// only at comparison time (see `urls::normalize`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub publication_name: Option<String>,
    pub source_url: String,
    pub full_text: String,
    pub summary: String,
    pub date_added: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-owner prompt currently used for summarization.
#[derive(Debug, Clone, FromRow)]
pub struct Settings {
    pub user_id: Uuid,
    pub summary_prompt: String,
    pub updated_at: DateTime<Utc>,
}

/// Per-owner prompt restored by "reset to default". Distinct from the
/// application-wide hardcoded default.
#[derive(Debug, Clone, FromRow)]
pub struct SettingsDefault {
    pub user_id: Uuid,
    pub default_prompt: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub pw_hash: String,
    pub created_at: DateTime<Utc>,
}
