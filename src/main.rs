use std::sync::Arc;

use movie_mashup_api::{
    config::Config,
    routes::{create_router, AppState},
    services::transport::HttpTransport,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_mashup_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let state = AppState::new(&config, Arc::new(HttpTransport::new()));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
