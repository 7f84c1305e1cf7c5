use std::env;

pub const DEFAULT_LOCATION: &str = "us-central1";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-001";

/// Environment configuration, captured once at startup.
///
/// The two required Google values are kept as present-or-absent instead of
/// being validated here: a missing value must surface as a 500 on the proxy
/// route, not abort the whole function at cold start.
#[derive(Clone, Debug)]
pub struct Config {
    /// Raw service-account key JSON from `GOOGLE_CREDENTIALS_JSON`.
    pub credentials_json: Option<String>,
    /// Target GCP project from `GOOGLE_PROJECT_ID`.
    pub project_id: Option<String>,
    /// Vertex AI region from `GOOGLE_REGION`.
    pub location: String,
    /// Model identifier from `GEMINI_MODEL`.
    pub model: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            credentials_json: non_empty_var("GOOGLE_CREDENTIALS_JSON"),
            project_id: non_empty_var("GOOGLE_PROJECT_ID"),
            location: non_empty_var("GOOGLE_REGION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            model: non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

/// An empty or whitespace-only value counts as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
