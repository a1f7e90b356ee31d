use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    articles::dtos::{CreateArticleRequest, ListQuery, UpdateArticleRequest},
    auth::{OwnerContext, dtos::ErrorResponse},
    ingest::dtos::DuplicateResponse,
    repositories::{ArticleUpdate, NewArticle},
    search, urls,
};

fn db_error(err: anyhow::Error) -> Response {
    error!(error = %err, "article repository call failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Database error".to_string(),
        }),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Article not found".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "articles",
    params(ListQuery),
    responses(
        (status = 200, description = "Owner's articles, newest first", body = [crate::entities::Article])
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_articles(
    owner: OwnerContext,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let articles = match state.article_repo.list_for_owner(owner.owner_id).await {
        Ok(articles) => articles,
        Err(err) => return db_error(err),
    };

    let articles = match query.search {
        Some(ref needle) => search::filter_articles(&articles, needle),
        None => articles,
    };

    (StatusCode::OK, Json(articles)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/articles",
    tag = "articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article stored", body = crate::entities::Article),
        (status = 400, description = "A required field is missing", body = ErrorResponse),
        (status = 409, description = "URL already stored for this owner", body = DuplicateResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_article(
    owner: OwnerContext,
    State(state): State<AppState>,
    Json(payload): Json<CreateArticleRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    if !payload.force {
        let existing = match state.article_repo.list_for_owner(owner.owner_id).await {
            Ok(articles) => articles,
            Err(err) => return db_error(err),
        };
        if let Some(duplicate) = urls::find_duplicate(&payload.source_url, &existing) {
            return (
                StatusCode::CONFLICT,
                Json(DuplicateResponse {
                    error: "URL already saved".to_string(),
                    existing: duplicate.clone(),
                }),
            )
                .into_response();
        }
    }

    let new_article = NewArticle {
        user_id: owner.owner_id,
        title: payload.title,
        publication_name: payload.publication_name,
        source_url: payload.source_url,
        full_text: payload.full_text,
        summary: payload.summary,
    };

    match state.article_repo.create(new_article).await {
        Ok(article) => {
            info!(article_id = %article.id, "article stored");
            (StatusCode::CREATED, Json(article)).into_response()
        }
        Err(err) => db_error(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article", body = crate::entities::Article),
        (status = 404, description = "No such article for this owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_article(
    owner: OwnerContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.article_repo.find_by_id(owner.owner_id, id).await {
        Ok(Some(article)) => (StatusCode::OK, Json(article)).into_response(),
        Ok(None) => not_found(),
        Err(err) => db_error(err),
    }
}

#[utoipa::path(
    patch,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = Uuid, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = crate::entities::Article),
        (status = 400, description = "Nothing to update or blank title", body = ErrorResponse),
        (status = 404, description = "No such article for this owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_article(
    owner: OwnerContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    let changes = ArticleUpdate {
        title: payload.title,
        publication_name: payload.publication_name,
        summary: payload.summary,
    };

    match state
        .article_repo
        .update(owner.owner_id, id, changes)
        .await
    {
        Ok(Some(article)) => (StatusCode::OK, Json(article)).into_response(),
        Ok(None) => not_found(),
        Err(err) => db_error(err),
    }
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 404, description = "No such article for this owner", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_article(
    owner: OwnerContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.article_repo.delete(owner.owner_id, id).await {
        Ok(true) => {
            info!(article_id = %id, "article deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => not_found(),
        Err(err) => db_error(err),
    }
}
