use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use rsvp_api::{AppStateInner, build_router};
use rsvp_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsvp=debug,rsvp_api=debug,rsvp_db=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("RSVP_DB_PATH").unwrap_or_else(|_| "rsvp.db".into());
    let host = std::env::var("RSVP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("RSVP_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database (creates the invitados table on first run)
    let db = Database::open(&PathBuf::from(&db_path))?;

    let app = build_router(Arc::new(AppStateInner { db }));

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("RSVP server listening on {addr}");
    info!("Endpoints: POST /api/rsvp, GET /api/rsvp, GET /api/stats, GET /health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
