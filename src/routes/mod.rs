mod health;
mod proxy;

use axum::{
    routing::{any, get},
    Router,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::handler))
        .route("/api/proxy-gemini", any(proxy::handler))
        .with_state(state)
}
