use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::SecretString;
use std::env;

use google_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    /// Shared by Safe Browsing and Fact Check Tools
    pub google_api_key: SecretString,
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub log_level: String,
    pub app_env: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            google_api_key: required_secret("GOOGLE_API_KEY")?,
            gemini_api_key: required_secret("GEMINI_API_KEY")?,
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        })
    }
}

fn required_secret(name: &str) -> Result<SecretString> {
    let value = env::var(name).with_context(|| format!("{name} must be set"))?;
    anyhow::ensure!(!value.is_empty(), "{name} must not be empty");
    Ok(SecretString::from(value))
}
