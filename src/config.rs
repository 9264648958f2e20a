use std::env;
use std::time::Duration;

use log::info;

use crate::model::request::DEFAULT_INFERENCE_BASE_URL;
use crate::model::GeneratorConfig;
use crate::web::session::DEFAULT_MAX_SESSIONS;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_sessions: usize,
    pub generator: GeneratorConfig,
}

impl Config {
    // Reads settings from the environment (after dotenv), with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").and_then(|v| v.parse::<u16>().ok()).unwrap_or(8080);
        let max_sessions = lookup("MAX_SESSIONS")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_SESSIONS);

        let base_url = lookup("INFERENCE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string());
        info!("Using inference endpoints under: {}", base_url);

        let mut generator = GeneratorConfig::with_base_url(&base_url);
        generator.api_token = lookup("HF_API_TOKEN").filter(|t| !t.trim().is_empty());
        generator.request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self { host, port, max_sessions, generator }
    }
}
