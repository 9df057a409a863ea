use serde::Deserialize;

/// simdash runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend gateway base URL
    pub backend_url: String,
    /// WebSocket stream URL
    pub ws_url: String,
    /// Directory for rolling NDJSON logs
    pub log_dir: String,
    /// Log level
    pub log_level: String,
    /// Model name sent in the stream's start_simulation config
    pub llm_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            ws_url: "ws://localhost:8000/ws".to_string(),
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
            llm_model: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            backend_url: std::env::var("SIMDASH_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            ws_url: std::env::var("SIMDASH_WS_URL")
                .unwrap_or_else(|_| "ws://localhost:8000/ws".to_string()),
            log_dir: std::env::var("SIMDASH_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_model: std::env::var("SIMDASH_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }
}
