use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{error::ProxyError, state::AppState};

/// The single prompt this service forwards. The proxy exists so a
/// credential-less frontend can ask exactly this question.
const PROMPT: &str = "Qual a capital do Brasil?";

/// Accepts any method and body; neither participates in the logic.
pub async fn handler(State(state): State<AppState>) -> Response {
    match try_proxy(state).await {
        Ok(response) => response,
        Err(error) => {
            tracing::warn!(error = %error, "Proxy request failed");
            error.into_response()
        }
    }
}

// Validation order is part of the contract: credentials are checked before the
// token exchange, the project id only after it.
async fn try_proxy(state: AppState) -> Result<Response, ProxyError> {
    let credentials_json = state.config.credentials_json.as_deref().ok_or_else(|| {
        ProxyError::MissingConfig("Google credentials not found in environment".to_string())
    })?;

    let access_token = state.gemini.access_token(credentials_json).await?;

    let project_id = state.config.project_id.as_deref().ok_or_else(|| {
        ProxyError::MissingConfig("Google project id not found in environment".to_string())
    })?;

    let response = state
        .gemini
        .generate_content(&access_token, project_id, PROMPT)
        .await?;

    let texto = response.primary_text()?;

    Ok(Json(json!({ "texto": texto })).into_response())
}
