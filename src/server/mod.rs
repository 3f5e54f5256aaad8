//! Web surface: one page, one handler per user action.

use tokio::net::TcpListener;
use tracing::info;

use crate::core::config::Config;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;

/// Bind and serve until the process is stopped.
pub async fn serve(
    config: &Config,
    state: state::AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(&config.bind).await?;
    info!(addr = %config.bind, "BuildBuddy listening");
    axum::serve(listener, router::build_router(state)).await?;
    Ok(())
}
