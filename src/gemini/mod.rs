pub mod vertex;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProxyError;

/// OAuth2 scope required for Vertex AI calls.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Seam between the request handler and Google.
///
/// The production implementation lives in [`vertex`]; tests substitute their
/// own so the handler can be driven without network access.
#[async_trait]
pub trait GeminiApi: Send + Sync {
    /// Exchange a service-account key (raw JSON string) for a short-lived
    /// bearer access token. The token is not cached across requests.
    async fn access_token(&self, credentials_json: &str) -> Result<String, ProxyError>;

    /// Issue a single `generateContent` call on behalf of `project_id`.
    async fn generate_content(
        &self,
        access_token: &str,
        project_id: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ProxyError>;
}

/// Build the production Vertex AI backend.
pub fn vertex(location: &str, model: &str) -> Arc<dyn GeminiApi> {
    Arc::new(vertex::VertexClient::new(location, model))
}

/// Request body for `generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Response envelope for `generateContent`.
///
/// The containers default so a partial payload parses to an empty response;
/// [`GenerateContentResponse::primary_text`] is where absence becomes an
/// error. A part without a `text` field fails deserialization outright, which
/// the caller reports as an invalid response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, copied verbatim.
    pub fn primary_text(&self) -> Result<String, ProxyError> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| {
                ProxyError::InvalidResponse(
                    "Gemini response contained no candidate text".to_string(),
                )
            })
    }
}
