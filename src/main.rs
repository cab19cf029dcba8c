//! Hansik menu server binary

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hansik::api::{create_router, create_router_with_cors, AppState};
use hansik::config::{AppConfig, LogFormat};
use hansik::menu::{MenuService, WeekdayCode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    // Build the menu table once; it is read-only from here on
    let table = config.menu_table()?;
    let days: Vec<&str> = table.days().map(|d: WeekdayCode| d.as_str()).collect();
    tracing::info!(
        path = config.menu.path.as_deref().unwrap_or("<built-in>"),
        days = %days.join(","),
        "Menu table loaded",
    );

    let state = AppState::new(MenuService::from_table(table));
    let router = if config.server.cors {
        create_router_with_cors(state)
    } else {
        create_router(state)
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("hansik=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
