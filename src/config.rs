use log::warn;
use std::path::PathBuf;

/// Runtime settings, read from `SCHEDULE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional dataset JSON loaded at startup.
    pub data_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable values keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("SCHEDULE_HOST").filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(raw) = lookup("SCHEDULE_PORT") {
            match raw.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid SCHEDULE_PORT {raw:?}; using {}", config.port),
            }
        }
        config.data_path = lookup("SCHEDULE_DATA")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if let Some(level) = lookup("SCHEDULE_LOG").filter(|l| !l.is_empty()) {
            config.log_level = level;
        }

        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
