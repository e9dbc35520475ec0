//! Client-side configuration: a JSON file at the OS config directory
//! (spec.md §6 "Client config file"), plus the `UNQUOTE_API_URL`
//! environment override — mirroring how `itsharex-aeroftp` locates its
//! config via the `dirs` crate.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub claim_code: String,
    #[serde(default)]
    pub stats_enabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            claim_code: String::new(),
            stats_enabled: false,
        }
    }
}

impl ClientConfig {
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("unquote").join("config.json"))
    }

    /// Loads the config file. Absent file is equivalent to the default
    /// (empty claim code, stats disabled). A corrupt file is logged and
    /// treated the same way rather than failing startup.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "discarding unreadable client config");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, raw)
    }
}

/// The API base URL: `UNQUOTE_API_URL` if set, else the localhost default.
pub fn api_url() -> String {
    std::env::var("UNQUOTE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned())
}

/// Directory local puzzle sessions are persisted under.
pub fn session_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("unquote")
        .join("sessions")
}
