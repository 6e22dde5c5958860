mod config;
mod gateway;
mod routes;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Fail fast: nothing is served without a reachable identity provider config.
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let provider = match gateway::HttpIdentityProvider::new(&config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!(error = %e, "identity provider client init failed");
            std::process::exit(1);
        }
    };
    tracing::info!(auth_base_url = %config.auth_base_url, "identity provider configured");

    let state = state::AppState::new(Arc::new(provider));

    let app = match routes::app(state) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "router init failed");
            std::process::exit(1);
        }
    };
    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .expect("failed to bind");

    tracing::info!(addr = %config.listen_addr(), "where-it-goes listening");
    axum::serve(listener, app).await.expect("server failed");
}
