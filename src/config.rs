use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Register host, e.g. "fakelog.cf" for the public test instance.
    pub host: String,

    /// Account symbol (tenant) within the host.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Whether to talk to the backend over https.
    #[serde(default = "default_true")]
    pub ssl: bool,

    /// Timeout for backend requests in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Log request URLs at debug level.
    #[serde(default = "default_true")]
    pub log_requests: bool,

    /// How long an issued pairing token stays consumable. The backend's
    /// real window is undocumented; confirm against a live integration.
    #[serde(default = "default_pairing_validity")]
    pub pairing_validity_secs: u64,
}

fn default_symbol() -> String { "Default".to_string() }
fn default_true() -> bool { true }
fn default_timeout() -> u64 { 30 }
fn default_pairing_validity() -> u64 { 300 }

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "fakelog.cf".to_string(),
            symbol: default_symbol(),
            ssl: true,
            timeout_secs: default_timeout(),
            log_requests: true,
            pairing_validity_secs: default_pairing_validity(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(cfg) = toml::from_str::<Config>(&content) {
                    return cfg;
                }
            }
        }
        Self::default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pairing_validity(&self) -> Duration {
        Duration::from_secs(self.pairing_validity_secs)
    }

    /// Build the transport handle concrete sources are constructed from.
    pub fn create_http_client(&self) -> Result<crate::http::HttpClient, reqwest::Error> {
        crate::http::HttpClient::from_config(self)
    }
}
