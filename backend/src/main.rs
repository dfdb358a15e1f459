use anyhow::Result;
use finances_backend::storage::prefs::PreferencesConnection;
use finances_backend::storage::sqlite::DbConnection;
use finances_backend::{create_router, initialize_backend};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db = DbConnection::open_default().await?;
    let prefs = PreferencesConnection::new_default()?;
    let app_state = initialize_backend(db, prefs).await?;
    let router = create_router(app_state);

    let addr: SocketAddr = "127.0.0.1:3000".parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
