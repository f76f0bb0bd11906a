use std::env;

use crate::error::{Result, RoastError};

/// Process configuration, loaded once from the environment and passed
/// explicitly into [`crate::roast::RoastService`]. Immutable after load.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub completion_api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub completion_temperature: f32,
    pub completion_top_p: f32,
    pub enable_image_analysis: bool,
    pub image_analysis_url: String,
    pub http_timeout_seconds: u64,
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let completion_api_key = env_string("COMPLETION_API_KEY", "");
        if completion_api_key.trim().is_empty() {
            return Err(RoastError::Configuration(
                "COMPLETION_API_KEY is required".to_string(),
            ));
        }

        Ok(Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            completion_api_key,
            completion_base_url: env_string(
                "COMPLETION_BASE_URL",
                "https://openrouter.ai/api/v1",
            ),
            completion_model: env_string("COMPLETION_MODEL", "openai/gpt-4o-mini"),
            completion_temperature: env_f32("COMPLETION_TEMPERATURE", 0.7),
            completion_top_p: env_f32("COMPLETION_TOP_P", 0.95),
            enable_image_analysis: env_bool("ENABLE_IMAGE_ANALYSIS", false),
            image_analysis_url: env_string(
                "IMAGE_ANALYSIS_URL",
                "http://localhost:8000/analyze",
            ),
            http_timeout_seconds: env_u64("HTTP_TIMEOUT_SECONDS", 60),
        })
    }
}
