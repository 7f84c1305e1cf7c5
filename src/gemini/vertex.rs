use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use yup_oauth2::ServiceAccountAuthenticator;

use crate::error::ProxyError;

use super::{GeminiApi, GenerateContentRequest, GenerateContentResponse, CLOUD_PLATFORM_SCOPE};

/// Calls Vertex AI over HTTPS, authenticating with a Google service account.
pub struct VertexClient {
    location: String,
    model: String,
    http: Client,
}

impl VertexClient {
    pub fn new(location: &str, model: &str) -> Self {
        Self {
            location: location.to_string(),
            model: model.to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self, project_id: &str) -> String {
        format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project_id}/locations/{location}/publishers/google/models/{model}:generateContent",
            location = self.location,
            model = self.model,
        )
    }
}

#[async_trait]
impl GeminiApi for VertexClient {
    async fn access_token(&self, credentials_json: &str) -> Result<String, ProxyError> {
        let key = yup_oauth2::parse_service_account_key(credentials_json)
            .map_err(|e| ProxyError::Auth(format!("Invalid service account key: {e}")))?;

        let auth = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| ProxyError::Auth(format!("Failed to build authenticator: {e}")))?;

        let token = auth
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| ProxyError::Auth(format!("Token exchange failed: {e}")))?;

        token
            .token()
            .map(ToString::to_string)
            .ok_or_else(|| ProxyError::Auth("Token exchange returned no access token".to_string()))
    }

    async fn generate_content(
        &self,
        access_token: &str,
        project_id: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ProxyError> {
        let body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .http
            .post(self.endpoint(project_id))
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProxyError::Upstream(format!("Request to Vertex AI failed: {e}")))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ProxyError::Upstream(format!("Failed to read Vertex AI response: {e}"))
        })?;

        if !status.is_success() {
            tracing::warn!(%status, body = %text, "Vertex AI returned an error");
            return Err(ProxyError::Upstream(upstream_message(&text)));
        }

        serde_json::from_str(&text).map_err(|e| {
            ProxyError::InvalidResponse(format!("Unexpected Vertex AI response: {e}"))
        })
    }
}

/// Error envelope returned by Google APIs on non-success statuses.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(default)]
    message: Option<String>,
}

/// Pull `error.message` out of an upstream error body, falling back to a
/// generic message when the body is not the expected envelope.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .and_then(|error| error.message)
        .unwrap_or_else(|| "Gemini API call failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let client = VertexClient::new("us-central1", "gemini-1.5-flash-001");

        assert_eq!(
            client.endpoint("my-project"),
            "https://us-central1-aiplatform.googleapis.com/v1/projects/my-project/locations/us-central1/publishers/google/models/gemini-1.5-flash-001:generateContent"
        );
    }

    #[test]
    fn test_upstream_message_from_error_envelope() {
        let body = r#"{
            "error": {
                "code": 403,
                "message": "Permission denied on resource project my-project.",
                "status": "PERMISSION_DENIED"
            }
        }"#;

        assert_eq!(
            upstream_message(body),
            "Permission denied on resource project my-project."
        );
    }

    #[test]
    fn test_upstream_message_falls_back_on_garbage() {
        assert_eq!(upstream_message("<html>502</html>"), "Gemini API call failed");
        assert_eq!(upstream_message("{}"), "Gemini API call failed");
        assert_eq!(upstream_message(r#"{"error":{}}"#), "Gemini API call failed");
    }
}
