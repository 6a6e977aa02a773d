use std::{env, fs, io, path::Path};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_owned(),
            model: "gpt-4o-mini".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub endpoint: String,
    pub title: String,
    pub unit_price: f64,
    pub currency: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mercadopago.com/checkout/preferences".to_owned(),
            title: "FitPlan Pro".to_owned(),
            unit_price: 9.99,
            currency: "USD".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub llm: LlmConfig,
    pub payment: PaymentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            allowed_origins: Vec::new(),
            llm: LlmConfig::default(),
            payment: PaymentConfig::default(),
        }
    }
}

impl Config {
    /// Reads the RON file at `path`, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }
}

/// Secrets never live in the config file.
pub fn secret(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} is not set, requests that need it will fail", name);
        String::new()
    })
}
