use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clubstats_api::{build_router, AppState};
use clubstats_common::{AppConfig, LogFormat};
use clubstats_store::PgRecordStore;

#[derive(Parser)]
#[command(name = "api", about = "Football club statistics API")]
struct Cli {
    /// Bind host (overrides WEB_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides WEB_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Apply pending migrations before serving
    #[arg(long)]
    migrate: bool,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clubstats=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    init_tracing(config.log_format);
    config.log_summary();

    let store =
        PgRecordStore::connect(&config.database_url, config.database_max_connections).await?;
    info!(
        max_connections = config.database_max_connections,
        "Connected to database"
    );

    if cli.migrate {
        sqlx::migrate!("../../migrations")
            .run(store.pool())
            .await
            .context("Failed to apply migrations")?;
        info!("Migrations complete");
    }

    let state = Arc::new(AppState::new(Arc::new(store)));
    let app = build_router(state, &config.allowed_origins);

    let host = cli.host.unwrap_or(config.web_host);
    let port = cli.port.unwrap_or(config.web_port);
    let addr = format!("{host}:{port}");
    info!("Club stats API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_flag_and_overrides_parse() {
        let cli = Cli::try_parse_from(["api", "--migrate", "--port", "8080"]).unwrap();
        assert!(cli.migrate);
        assert_eq!(cli.port, Some(8080));
        assert!(cli.host.is_none());
    }

    #[test]
    fn serving_without_migrate_is_the_default() {
        let cli = Cli::try_parse_from(["api"]).unwrap();
        assert!(!cli.migrate);
    }
}
