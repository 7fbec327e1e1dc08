//! Configuration management for Mathcards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mathcards_common::constants::DEFAULT_LISTEN_ADDR;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Session generation settings
    #[serde(default)]
    pub practice: PracticeConfig,

    /// Cross-origin settings for the browser frontend
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Practice-specific configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PracticeConfig {
    /// Seed for the problem generator (OS entropy when unset)
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Optional cap; longer session requests are clamped to this many problems
    #[serde(default)]
    pub max_operations: Option<usize>,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(seed) = args.seed {
            config.practice.rng_seed = Some(seed);
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            practice: PracticeConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}
