use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use campus_api::auth::{AppState, AppStateInner};
use campus_server::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "campus_server=debug,campus_api=debug,campus_db=debug,tower_http=debug".into()
            }),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("CAMPUS_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("CAMPUS_DB_PATH").unwrap_or_else(|_| "campus.db".into());
    let host = std::env::var("CAMPUS_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("CAMPUS_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = campus_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner { db, jwt_secret });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Campus server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
