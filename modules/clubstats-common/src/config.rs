use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Web server
    pub web_host: String,
    pub web_port: u16,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,

    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections: u32 = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be a number, got {v:?}"))?,
            None => 10,
        };

        let web_port: u16 = match lookup("WEB_PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("WEB_PORT must be a port number, got {v:?}"))?,
            None => 3000,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            web_host: lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            log_format,
        })
    }

    /// Log the loaded values without credentials.
    pub fn log_summary(&self) {
        // Credentials live in the URL, so only the host part is logged.
        let db_host = self
            .database_url
            .rsplit_once('@')
            .map(|(_, host)| host)
            .unwrap_or("<local>");

        tracing::info!("Config loaded:");
        tracing::info!("  DATABASE_URL: ...@{db_host}");
        tracing::info!("  DATABASE_MAX_CONNECTIONS: {}", self.database_max_connections);
        tracing::info!("  WEB: {}:{}", self.web_host, self.web_port);
        if self.allowed_origins.is_empty() {
            tracing::info!("  ALLOWED_ORIGINS: <any>");
        } else {
            tracing::info!("  ALLOWED_ORIGINS: {}", self.allowed_origins.join(", "));
        }
    }
}
