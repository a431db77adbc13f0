// src/config.rs
use crate::domain::error::DomainResult;
use crate::infrastructure::embeddings::ollama_provider::{
    DEFAULT_EMBEDDING_MODEL, DEFAULT_GEN_MODEL,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{instrument, trace};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Model used for embedding requests (default: "mxbai-embed-large")
    #[serde(default = "default_embed_model")]
    pub embed_model: String,

    /// Model used for generation requests (default: "llama3.2:3b")
    #[serde(default = "default_gen_model")]
    pub gen_model: String,

    /// Explicit Ollama server URL. When unset, OLLAMA_HOST or the loopback
    /// default applies at connection time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Log level fallback when no -d flag is given (e.g. "debug")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_embed_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_gen_model() -> String {
    DEFAULT_GEN_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            embed_model: default_embed_model(),
            gen_model: default_gen_model(),
            server: None,
            log_level: None,
        }
    }
}

// Load settings from config file and environment variables
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = Settings::default();

    // Explicit path wins; otherwise look in the user config dir.
    let config_sources = [
        config_path.map(|p| p.to_path_buf()),
        dirs::home_dir().map(|p| p.join(".config/ollo/config.toml")),
    ];

    for config_path in config_sources.iter().flatten() {
        if config_path.exists() {
            trace!("Loading config from: {:?}", config_path);

            if let Ok(config_text) = std::fs::read_to_string(config_path) {
                if let Ok(file_settings) = toml::from_str::<Settings>(&config_text) {
                    settings = file_settings;
                }
            }
            break;
        }
    }

    // Override with environment variables
    if let Ok(embed_model) = std::env::var("OLLO_EMBED_MODEL") {
        trace!("Using OLLO_EMBED_MODEL from environment: {}", embed_model);
        settings.embed_model = embed_model;
    }

    if let Ok(gen_model) = std::env::var("OLLO_GEN_MODEL") {
        trace!("Using OLLO_GEN_MODEL from environment: {}", gen_model);
        settings.gen_model = gen_model;
    }

    if let Ok(server) = std::env::var("OLLO_SERVER") {
        trace!("Using OLLO_SERVER from environment: {}", server);
        settings.server = Some(server);
    }

    if let Ok(level) = std::env::var("OLLO_LOG_LEVEL") {
        settings.log_level = Some(level);
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
