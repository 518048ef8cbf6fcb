use mimalloc::MiMalloc;
use risk_sentinel::{config::AppConfig, db, routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "risk_sentinel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("missing required configuration: {e}"))?;

    let pool = db::create_lazy_pool(
        &config.database_url,
        config.database_max_connections,
        config.dashboard_query_timeout(),
    )?;

    // Dashboards degrade to defaults while the database is down, so a failed
    // migration at boot is not fatal.
    if let Err(e) = db::run_migrations(&pool).await {
        tracing::warn!(error = %e, "Migrations not applied at startup");
    }

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "Starting Risk Sentinel API server");

    let app = routes::router(AppState::new(pool, config));
    axum::serve(listener, app).await?;

    Ok(())
}
