use std::net::SocketAddr;

use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::github::GithubClient;
use server::graphql::build_schema;
use server::seed::seed_demo_data;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    seed_demo_data(&db).await?;

    let schema = build_schema(db.clone());
    let github = GithubClient::new(&config.github)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        db,
        config,
        schema,
        github,
    };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
