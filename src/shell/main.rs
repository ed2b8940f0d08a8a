use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use attendance_tracker::modules::attendance::adapters::outbound::backing_store_in_memory::InMemoryBackingStore;
use attendance_tracker::shared::core::primitives::CanonicalDate;
use attendance_tracker::shared::infrastructure::audit_log::in_memory::InMemoryAuditLog;
use attendance_tracker::shell::config::AppConfig;
use attendance_tracker::shell::http::router;
use attendance_tracker::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    // In-memory backing store for now
    let audit = Arc::new(InMemoryAuditLog::new());
    let table = Arc::new(InMemoryBackingStore::new(audit.clone()));

    let today = CanonicalDate::today();
    let state = AppState::build(&config, table, audit, today);
    if let Err(e) = state.attendance.fetch_for_date(today).await {
        tracing::warn!(error = %e, "initial attendance fetch failed");
    }

    let app = router(state);

    tracing::info!(
        reconcile = ?config.reconcile,
        "attendance API on http://{}, GraphQL on /gql",
        config.bind_addr
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
