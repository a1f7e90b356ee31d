//! Route table, OpenAPI document and the middleware stack.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app_state::AppState,
    articles, auth, export, health, ingest,
    middleware::{RateLimit, rate_limit_middleware},
    settings,
};

/// Fixed-window allowance for the routes that reach out to the network or
/// the summarization backend.
const INGEST_RATE_LIMIT: u32 = 10;
const INGEST_RATE_WINDOW_SECONDS: i64 = 60;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::handlers::signup,
        auth::handlers::login,
        ingest::handlers::ingest_article,
        ingest::handlers::extract_article,
        ingest::handlers::summarize_text,
        articles::handlers::list_articles,
        articles::handlers::create_article,
        articles::handlers::get_article,
        articles::handlers::update_article,
        articles::handlers::delete_article,
        settings::handlers::get_settings,
        settings::handlers::update_settings,
        export::export_articles,
    ),
    components(schemas(
        auth::dtos::SignupRequest,
        auth::dtos::LoginRequest,
        auth::dtos::LoginResponse,
        auth::dtos::ErrorResponse,
        crate::entities::Article,
        crate::extractor::ExtractedArticle,
        crate::ingest::ArticleDraft,
        ingest::dtos::IngestRequest,
        ingest::dtos::IngestResponse,
        ingest::dtos::DuplicateResponse,
        ingest::dtos::ExtractRequest,
        ingest::dtos::SummarizeRequest,
        ingest::dtos::SummarizeResponse,
        articles::dtos::CreateArticleRequest,
        articles::dtos::UpdateArticleRequest,
        settings::dtos::SettingsResponse,
        settings::dtos::UpdateSettingsRequest,
        export::ExportResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "ingest", description = "URL ingestion, extraction and summarization"),
        (name = "articles", description = "Owner-scoped article store"),
        (name = "settings", description = "Summary prompt settings"),
        (name = "export", description = "Library export"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let rate_limit = RateLimit::new(INGEST_RATE_LIMIT, INGEST_RATE_WINDOW_SECONDS);

    let ingestion_routes = Router::new()
        .route("/api/ingest", post(ingest::handlers::ingest_article))
        .route("/api/extract", post(ingest::handlers::extract_article))
        .route("/api/summarize", post(ingest::handlers::summarize_text))
        .layer(from_fn_with_state(rate_limit, rate_limit_middleware));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/healthz", get(health::health_check))
        .route("/api/auth/signup", post(auth::handlers::signup))
        .route("/api/auth/login", post(auth::handlers::login))
        .merge(ingestion_routes)
        .route(
            "/api/articles",
            get(articles::handlers::list_articles).post(articles::handlers::create_article),
        )
        .route(
            "/api/articles/{id}",
            get(articles::handlers::get_article)
                .patch(articles::handlers::update_article)
                .delete(articles::handlers::delete_article),
        )
        .route(
            "/api/settings",
            get(settings::handlers::get_settings).patch(settings::handlers::update_settings),
        )
        .route("/api/export", get(export::export_articles))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
