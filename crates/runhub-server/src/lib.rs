//! runhub-server: Axum server that embeds the runhub console and answers its
//! API from fixture data, for local development and demos.

pub mod api;
pub mod fixture;
pub mod state;

use std::net::SocketAddr;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::fixture::Fixture;
use crate::state::AppState;

pub use state::ServerConfig;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .nest("/api", api::router())
        // Console: serve embedded static files
        .fallback(api::serve_frontend)
        .with_state(state)
        .layer(cors)
}

/// Load the configured fixture, or the sample data when none is set.
pub fn load_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let fixture = match &config.fixtures {
        Some(path) => {
            let fixture = fixture::load_fixture(path)?;
            info!(
                "Loaded {} ({} runs)",
                path.display(),
                fixture.run_count()
            );
            fixture
        }
        None => {
            info!("No fixture file given, serving sample data");
            Fixture::sample()
        }
    };
    Ok(AppState::new(fixture))
}

/// Start the server on the given address.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = load_state(&config)?;
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("runhub console at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
