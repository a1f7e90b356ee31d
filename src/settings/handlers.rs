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
    settings::dtos::{SettingsResponse, UpdateSettingsRequest},
};

fn db_error(err: anyhow::Error) -> Response {
    error!(error = %err, "settings repository call failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Database error".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Current and default prompt", body = SettingsResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_settings(owner: OwnerContext, State(state): State<AppState>) -> Response {
    let saved = match state.settings_repo.fetch(owner.owner_id).await {
        Ok(saved) => saved,
        Err(err) => return db_error(err),
    };
    let default = match state.settings_repo.fetch_default(owner.owner_id).await {
        Ok(default) => default,
        Err(err) => return db_error(err),
    };

    let default_prompt = default
        .map(|d| d.default_prompt)
        .unwrap_or_else(|| DEFAULT_SUMMARY_PROMPT.to_string());

    let (summary_prompt, updated_at) = match saved {
        Some(settings) => (settings.summary_prompt, Some(settings.updated_at)),
        None => (default_prompt.clone(), None),
    };

    (
        StatusCode::OK,
        Json(SettingsResponse {
            summary_prompt,
            default_prompt,
            updated_at,
        }),
    )
        .into_response()
}

#[utoipa::path(
    patch,
    path = "/api/settings",
    tag = "settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings after the action", body = SettingsResponse),
        (status = 400, description = "Unknown action or blank prompt", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_settings(
    owner: OwnerContext,
    State(state): State<AppState>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }

    match payload {
        UpdateSettingsRequest::Save { summary_prompt } => {
            let saved = match state
                .settings_repo
                .save_prompt(owner.owner_id, &summary_prompt)
                .await
            {
                Ok(saved) => saved,
                Err(err) => return db_error(err),
            };
            info!("summary prompt saved");
            respond_with(&state, owner, saved.summary_prompt, Some(saved.updated_at)).await
        }
        UpdateSettingsRequest::SaveAsDefault { summary_prompt } => {
            let saved = match state
                .settings_repo
                .save_prompt(owner.owner_id, &summary_prompt)
                .await
            {
                Ok(saved) => saved,
                Err(err) => return db_error(err),
            };
            let default = match state
                .settings_repo
                .save_default_prompt(owner.owner_id, &summary_prompt)
                .await
            {
                Ok(default) => default,
                Err(err) => return db_error(err),
            };
            info!("summary prompt saved as default");
            (
                StatusCode::OK,
                Json(SettingsResponse {
                    summary_prompt: saved.summary_prompt,
                    default_prompt: default.default_prompt,
                    updated_at: Some(saved.updated_at),
                }),
            )
                .into_response()
        }
        UpdateSettingsRequest::ResetToDefault => {
            let default_prompt = match state.settings_repo.fetch_default(owner.owner_id).await {
                Ok(Some(default)) => default.default_prompt,
                Ok(None) => DEFAULT_SUMMARY_PROMPT.to_string(),
                Err(err) => return db_error(err),
            };
            let saved = match state
                .settings_repo
                .save_prompt(owner.owner_id, &default_prompt)
                .await
            {
                Ok(saved) => saved,
                Err(err) => return db_error(err),
            };
            info!("summary prompt reset to default");
            (
                StatusCode::OK,
                Json(SettingsResponse {
                    summary_prompt: saved.summary_prompt,
                    default_prompt,
                    updated_at: Some(saved.updated_at),
                }),
            )
                .into_response()
        }
    }
}

async fn respond_with(
    state: &AppState,
    owner: OwnerContext,
    summary_prompt: String,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
) -> Response {
    let default_prompt = match state.settings_repo.fetch_default(owner.owner_id).await {
        Ok(Some(default)) => default.default_prompt,
        Ok(None) => DEFAULT_SUMMARY_PROMPT.to_string(),
        Err(err) => return db_error(err),
    };

    (
        StatusCode::OK,
        Json(SettingsResponse {
            summary_prompt,
            default_prompt,
            updated_at,
        }),
    )
        .into_response()
}
