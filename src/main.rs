use std::sync::Arc;

use company_dashboard::{
    app_router,
    config::{Config, LogFormat},
    db,
    service::CompanyService,
    store::PgCompanyStore,
    AppState,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    let pool = db::create_pool(&config).await?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "database pool ready"
    );

    match &config.low_market_cap_category_id {
        Some(category) => tracing::info!(%category, "excluding category from leaderboard"),
        None => tracing::warn!("LOW_MARKET_CAP_CATEGORY_ID unset, leaderboard includes every category"),
    }

    let service = CompanyService::new(
        Arc::new(PgCompanyStore::new(pool)),
        config.low_market_cap_category_id.clone(),
    );
    let app = app_router(AppState::new(service));

    tracing::info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: &LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let fmt_layer = fmt::layer().with_target(true);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json().with_current_span(true).flatten_event(true))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.compact())
            .init(),
    }
}
