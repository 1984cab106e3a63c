use std::net::SocketAddr;
use std::sync::Arc;

use common::storage::filesystem::FilesystemFileStore;
use tracing::info;

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load()?;

    // Schema initialization failure is a startup fault, not a request error.
    let db = server::database::init_db(&config.database.url).await?;

    let files = FilesystemFileStore::new(
        config.storage.root.clone(),
        config.storage.max_file_size,
    )
    .await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        db,
        files: Arc::new(files),
        config,
    };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
