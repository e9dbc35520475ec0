//! Server configuration loaded from the environment (spec.md §6).
//! Missing required variables fail fast at startup with a specific
//! message, as the teacher's `main.rs` does for `DATABASE_URL`.

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub quotes_file_path: String,
    pub database_url: Option<String>,
    pub otel_endpoint: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let quotes_file_path = dotenvy::var("QUOTES_FILE_PATH")
            .map_err(|_| "missing required environment variable QUOTES_FILE_PATH".to_owned())?;

        let port = dotenvy::var("PORT")
            .unwrap_or_else(|_| "3000".to_owned())
            .parse::<u16>()
            .map_err(|e| format!("PORT must be a valid port number: {e}"))?;

        Ok(Self {
            host: dotenvy::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned()),
            port,
            log_level: dotenvy::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
            quotes_file_path,
            database_url: dotenvy::var("DATABASE_URL").ok(),
            otel_endpoint: dotenvy::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
