use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    auth::{OwnerContext, dtos::ErrorResponse},
    config::DEFAULT_SUMMARY_PROMPT,
    extractor::ExtractError,
    ingest::{
        IngestError, IngestOutcome,
        dtos::{
            DuplicateResponse, ExtractRequest, IngestRequest, IngestResponse, SummarizeRequest,
            SummarizeResponse,
        },
    },
};

#[utoipa::path(
    post,
    path = "/api/ingest",
    tag = "ingest",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Draft ready for confirmation", body = IngestResponse),
        (status = 400, description = "URL is not syntactically valid", body = ErrorResponse),
        (status = 409, description = "URL already stored for this owner", body = DuplicateResponse),
        (status = 500, description = "A pipeline stage failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn ingest_article(
    owner: OwnerContext,
    State(state): State<AppState>,
    Json(payload): Json<IngestRequest>,
) -> Response {
    match state
        .pipeline
        .run(owner.owner_id, &payload.url, payload.force)
        .await
    {
        Ok(IngestOutcome::Draft(draft)) => {
            (StatusCode::OK, Json(IngestResponse { draft })).into_response()
        }
        Ok(IngestOutcome::Duplicate(existing)) => (
            StatusCode::CONFLICT,
            Json(DuplicateResponse {
                error: "URL already saved".to_string(),
                existing,
            }),
        )
            .into_response(),
        Err(err) => ingest_error_response(err),
    }
}

fn ingest_error_response(err: IngestError) -> Response {
    let status = match &err {
        IngestError::Extract(ExtractError::InvalidUrl(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!(stage = %err.stage(), error = %err, "ingestion failed");
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/extract",
    tag = "ingest",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Readable text extracted", body = crate::extractor::ExtractedArticle),
        (status = 400, description = "URL is not syntactically valid", body = ErrorResponse),
        (status = 500, description = "Fetch or extraction failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn extract_article(
    _owner: OwnerContext,
    State(state): State<AppState>,
    Json(payload): Json<ExtractRequest>,
) -> Response {
    match state.extractor.extract(&payload.url).await {
        Ok(extracted) => {
            info!(title = %extracted.title, "extraction succeeded");
            (StatusCode::OK, Json(extracted)).into_response()
        }
        Err(err @ ExtractError::InvalidUrl(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/summarize",
    tag = "ingest",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary generated with the owner's prompt", body = SummarizeResponse),
        (status = 400, description = "Text is empty", body = ErrorResponse),
        (status = 500, description = "Summarization backend failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn summarize_text(
    owner: OwnerContext,
    State(state): State<AppState>,
    Json(payload): Json<SummarizeRequest>,
) -> Response {
    if payload.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Text is required".to_string(),
            }),
        )
            .into_response();
    }

    let prompt = match state.settings_repo.fetch(owner.owner_id).await {
        Ok(Some(settings)) => settings.summary_prompt,
        Ok(None) => DEFAULT_SUMMARY_PROMPT.to_string(),
        Err(err) => {
            error!(error = %err, "settings lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.summarizer.summarize(&payload.text, &prompt).await {
        Ok(summary) => (StatusCode::OK, Json(SummarizeResponse { summary })).into_response(),
        Err(err) => {
            error!(error = %err, "summarization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::testing::TestState;
    use crate::auth::jwt::JwtService;
    use crate::config::Config;
    use crate::entities::Article;
    use crate::extractor::ExtractedArticle;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, header::AUTHORIZATION},
        routing::post,
    };
    use chrono::Utc;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/api/ingest", post(ingest_article))
            .route("/api/extract", post(extract_article))
            .route("/api/summarize", post(summarize_text))
            .with_state(state)
    }

    fn bearer(owner: Uuid) -> String {
        let config = Config::from_env().expect("failed to load config");
        let token = JwtService::new(config.jwt_secret())
            .generate_token(owner)
            .expect("failed to generate token");
        format!("Bearer {token}")
    }

    fn request(uri: &str, owner: Uuid, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(AUTHORIZATION, bearer(owner))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn stored_article(owner: Uuid, url: &str) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4(),
            user_id: owner,
            title: "Stored".to_string(),
            publication_name: None,
            source_url: url.to_string(),
            full_text: "body".to_string(),
            summary: "summary".to_string(),
            date_added: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn ingest_requires_authentication() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/ingest")
            .header("content-type", "application/json")
            .body(Body::from(json!({"url": "https://example.com"}).to_string()))
            .unwrap();

        let response = app(TestState::new().build()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn ingest_returns_a_draft() {
        let owner = Uuid::new_v4();
        let mut mocks = TestState::new();
        mocks.articles.expect_list_for_owner().returning(|_| Ok(vec![]));
        mocks.extractor.expect_extract().returning(|url| {
            Ok(ExtractedArticle {
                title: "Fresh".to_string(),
                publication_name: Some("example.com".to_string()),
                source_url: url.to_string(),
                full_text: "body".to_string(),
            })
        });
        mocks.settings.expect_fetch().returning(|_| Ok(None));
        mocks
            .summarizer
            .expect_summarize()
            .returning(|_, _| Ok("- points".to_string()));

        let response = app(mocks.build())
            .oneshot(request(
                "/api/ingest",
                owner,
                json!({"url": "https://example.com/piece"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["draft"]["title"], "Fresh");
        assert_eq!(json["draft"]["summary"], "- points");
    }

    #[tokio::test]
    async fn ingest_conflicts_with_the_existing_article_in_the_body() {
        let owner = Uuid::new_v4();
        let existing = stored_article(owner, "https://example.com/piece");
        let existing_id = existing.id;

        let mut mocks = TestState::new();
        mocks
            .articles
            .expect_list_for_owner()
            .returning(move |_| Ok(vec![existing.clone()]));

        let response = app(mocks.build())
            .oneshot(request(
                "/api/ingest",
                owner,
                json!({"url": "https://example.com/piece?utm_source=mail"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["existing"]["id"], existing_id.to_string());
        assert!(!json["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ingest_maps_bad_urls_to_400() {
        let owner = Uuid::new_v4();
        let mut mocks = TestState::new();
        mocks.articles.expect_list_for_owner().returning(|_| Ok(vec![]));
        mocks
            .extractor
            .expect_extract()
            .returning(|url| Err(ExtractError::InvalidUrl(url.to_string())));

        let response = app(mocks.build())
            .oneshot(request("/api/ingest", owner, json!({"url": "not a url"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ingest_maps_unreadable_pages_to_500() {
        let owner = Uuid::new_v4();
        let mut mocks = TestState::new();
        mocks.articles.expect_list_for_owner().returning(|_| Ok(vec![]));
        mocks
            .extractor
            .expect_extract()
            .returning(|_| Err(ExtractError::NotExtractable));

        let response = app(mocks.build())
            .oneshot(request(
                "/api/ingest",
                owner,
                json!({"url": "https://example.com/spa"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn extract_returns_the_extracted_article() {
        let owner = Uuid::new_v4();
        let mut mocks = TestState::new();
        mocks.extractor.expect_extract().returning(|url| {
            Ok(ExtractedArticle {
                title: "Readable".to_string(),
                publication_name: None,
                source_url: url.to_string(),
                full_text: "text".to_string(),
            })
        });

        let response = app(mocks.build())
            .oneshot(request(
                "/api/extract",
                owner,
                json!({"url": "https://example.com/piece"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["title"], "Readable");
        assert_eq!(json["source_url"], "https://example.com/piece");
    }

    #[tokio::test]
    async fn summarize_uses_the_saved_prompt() {
        let owner = Uuid::new_v4();
        let mut mocks = TestState::new();
        mocks.settings.expect_fetch().returning(move |_| {
            Ok(Some(crate::entities::Settings {
                user_id: owner,
                summary_prompt: "one sentence only".to_string(),
                updated_at: Utc::now(),
            }))
        });
        mocks
            .summarizer
            .expect_summarize()
            .withf(|text, prompt| text == "long article text" && prompt == "one sentence only")
            .returning(|_, _| Ok("short".to_string()));

        let response = app(mocks.build())
            .oneshot(request(
                "/api/summarize",
                owner,
                json!({"text": "long article text"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["summary"], "short");
    }

    #[tokio::test]
    async fn summarize_rejects_blank_text() {
        let owner = Uuid::new_v4();
        let response = app(TestState::new().build())
            .oneshot(request("/api/summarize", owner, json!({"text": "   "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
