use std::net::SocketAddr;

use tracing::{Level, info};

use toolserver::config::ToolConfig;
use toolserver::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ToolConfig::load()?;
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState::new(&config)?;
    let app = build_router(state);

    info!("Tool server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
