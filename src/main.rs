use anyhow::Result;
use tracing::info;

use translate_proxy::config::Config;
use translate_proxy::server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translate_proxy=info".parse()?),
        )
        .init();

    // Load configuration from environment
    let config = Config::from_env()?;
    let addr = format!("0.0.0.0:{}", config.port);

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Translation proxy listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
