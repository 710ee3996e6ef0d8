//! simplenotes - HTTP server binary.

use std::net::SocketAddr;

use log::{info, warn};
use simplenotes_core::db::open_db;
use simplenotes_core::init_logging;
use simplenotes_web::app::build_router;
use simplenotes_web::config::ServerConfig;
use simplenotes_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let conn = open_db(&config.database_path)?;
    if config.auth_token.is_none() {
        warn!("event=server_start module=web status=warn detail=auth_disabled");
    }

    let state = AppState::new(conn, config.auth_token.clone());
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "event=server_start module=web status=ok addr={addr} db={}",
        config.database_path.display()
    );
    axum::serve(listener, app).await?;

    Ok(())
}
