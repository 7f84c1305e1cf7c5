use gemini_proxy::{routes, state::AppState};
use lambda_http::{run, tracing, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let app = routes::router(AppState::new());

    run(app).await
}
