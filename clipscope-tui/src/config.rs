// File: clipscope-tui/src/config.rs

use anyhow::{anyhow, bail};
use clap::Parser;

use clipscope_ai::ProviderConfig;
use clipscope_common::models::session::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_POSITIVE_THRESHOLD, MAX_HISTORY_CAPACITY,
};
use clipscope_common::SessionConfig;

use crate::capabilities::CommandShare;

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "clipscope")]
#[command(author, version, about = "ClipScope - AI metadata and sentiment for TikTok, YouTube and Instagram links")]
pub struct Args {
    /// Video URL to analyze immediately on start-up
    pub url: Option<String>,

    /// Analysis provider: "gemini" or "openai"
    #[arg(long, default_value = "gemini")]
    pub provider: String,

    /// Model name (defaults to the provider's standard model)
    #[arg(long)]
    pub model: Option<String>,

    /// Override the provider's API base URL
    #[arg(long)]
    pub api_base: Option<String>,

    /// API key; falls back to GEMINI_API_KEY / OPENAI_API_KEY (also read from .env)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Sampling temperature passed to the model
    #[arg(long)]
    pub temperature: Option<f32>,

    /// How many past analyses to remember (1-100)
    #[arg(
        long,
        default_value_t = DEFAULT_HISTORY_CAPACITY,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_HISTORY_CAPACITY as u64)
    )]
    pub history_capacity: usize,

    /// Sentiment scores above this are labelled positive
    #[arg(long, default_value_t = DEFAULT_POSITIVE_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub positive_threshold: u8,

    /// External command that receives share payloads as JSON on stdin
    #[arg(long)]
    pub share_command: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Environment variable consulted when `--api-key` is absent.
    pub fn api_key_env(&self) -> &'static str {
        match self.provider.to_lowercase().as_str() {
            "openai" => "OPENAI_API_KEY",
            _ => "GEMINI_API_KEY",
        }
    }

    /// Build the provider configuration, looking the key up with `env` when needed.
    pub fn provider_config_with<F>(&self, env: F) -> anyhow::Result<ProviderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_name = self.api_key_env();
        let api_key = self
            .api_key
            .clone()
            .or_else(|| env(env_name))
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("no API key: pass --api-key or set {}", env_name))?;

        let mut config = match self.provider.to_lowercase().as_str() {
            "gemini" | "google" => ProviderConfig::gemini(api_key),
            "openai" => ProviderConfig::openai(api_key),
            other => bail!("unknown provider '{}' (expected 'gemini' or 'openai')", other),
        };

        if let Some(model) = &self.model {
            config.default_model = model.clone();
        }
        config.api_base = self.api_base.clone();
        if let Some(temperature) = self.temperature {
            config.options.insert("temperature".to_string(), temperature.to_string());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn provider_config(&self) -> anyhow::Result<ProviderConfig> {
        self.provider_config_with(|name| std::env::var(name).ok())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            history_capacity: self.history_capacity,
            positive_threshold: self.positive_threshold,
        }
    }

    pub fn share_target(&self) -> Option<CommandShare> {
        self.share_command.as_deref().and_then(CommandShare::parse)
    }
}
