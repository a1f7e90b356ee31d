//! Full-library export as a downloadable JSON document.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::CONTENT_DISPOSITION},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    app_state::AppState,
    auth::{OwnerContext, dtos::ErrorResponse},
    entities::Article,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ExportResponse {
    pub exported_at: DateTime<Utc>,
    pub articles: Vec<Article>,
}

#[utoipa::path(
    get,
    path = "/api/export",
    tag = "export",
    responses(
        (status = 200, description = "All of the owner's articles as an attachment", body = ExportResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn export_articles(owner: OwnerContext, State(state): State<AppState>) -> Response {
    let articles = match state.article_repo.list_for_owner(owner.owner_id).await {
        Ok(articles) => articles,
        Err(err) => {
            error!(error = %err, "article listing failed during export");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            )
                .into_response();
        }
    };

    let exported_at = Utc::now();
    let disposition = format!(
        "attachment; filename=\"shelf-export-{}.json\"",
        exported_at.format("%Y-%m-%d")
    );

    info!(count = articles.len(), "library exported");
    (
        StatusCode::OK,
        [(CONTENT_DISPOSITION, disposition)],
        Json(ExportResponse {
            exported_at,
            articles,
        }),
    )
        .into_response()
}
