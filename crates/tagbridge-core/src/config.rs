//! Gateway configuration loaded from the environment (`.env` honoured by the
//! binary). Unset or invalid values fall back to defaults; nothing here
//! fails.

use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_PATH: &str = "./data/tagbridge_store";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | TAGBRIDGE_BIND_ADDR | 0.0.0.0:8080 | Listen address. |
/// | TAGBRIDGE_DATA_PATH | ./data/tagbridge_store | sled store for the usage counter. |
/// | TAGBRIDGE_COUNTER_NAMESPACE | usage | sled tree holding counters. |
/// | TAGBRIDGE_COUNTER_KEY | uses | Key incremented per contextual request. |
/// | TAGBRIDGE_EXECUTION_TIMEOUT_MS | 5000 | Engine deadline per script. |
/// | TAGBRIDGE_ALLOWED_ORIGINS | (any) | Comma-separated CORS origins. |
/// | TAGBRIDGE_KEEPALIVE_URL | (off) | Periodically pinged when set. |
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: String,
    pub data_path: String,
    pub counter_namespace: String,
    pub counter_key: String,
    pub execution_timeout_ms: u64,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub keepalive_url: Option<String>,
}

impl GatewayConfig {
    /// Load from environment. Unset or invalid => defaults (see table above).
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_string("TAGBRIDGE_BIND_ADDR", DEFAULT_BIND_ADDR),
            data_path: env_string("TAGBRIDGE_DATA_PATH", DEFAULT_DATA_PATH),
            counter_namespace: env_string("TAGBRIDGE_COUNTER_NAMESPACE", "usage"),
            counter_key: env_string("TAGBRIDGE_COUNTER_KEY", "uses"),
            execution_timeout_ms: env_u64("TAGBRIDGE_EXECUTION_TIMEOUT_MS", DEFAULT_TIMEOUT_MS),
            allowed_origins: env_csv("TAGBRIDGE_ALLOWED_ORIGINS"),
            keepalive_url: env_opt_string("TAGBRIDGE_KEEPALIVE_URL"),
        }
    }

    pub fn execution_timeout(&self) -> Duration {
        Duration::from_millis(self.execution_timeout_ms)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_path: DEFAULT_DATA_PATH.to_string(),
            counter_namespace: "usage".to_string(),
            counter_key: "uses".to_string(),
            execution_timeout_ms: DEFAULT_TIMEOUT_MS,
            allowed_origins: Vec::new(),
            keepalive_url: None,
        }
    }
}

fn env_string(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(v) => v.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

fn env_csv(name: &str) -> Vec<String> {
    std::env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
