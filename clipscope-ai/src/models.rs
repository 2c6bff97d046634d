use serde::{Serialize, Deserialize};
use std::collections::HashMap;

use clipscope_common::AnalysisError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for an AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider ("gemini" or "openai")
    pub provider_type: String,

    /// Base URL for API requests
    pub api_base: Option<String>,

    /// API key for authentication
    pub api_key: String,

    /// Default model to use with this provider
    pub default_model: String,

    /// Additional provider-specific configuration options
    pub options: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            provider_type: "gemini".to_string(),
            api_base: None,
            api_key: api_key.into(),
            default_model: GEMINI_DEFAULT_MODEL.to_string(),
            options: HashMap::new(),
        }
    }

    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            provider_type: "openai".to_string(),
            api_base: None,
            api_key: api_key.into(),
            default_model: OPENAI_DEFAULT_MODEL.to_string(),
            options: HashMap::new(),
        }
    }

    /// Configured base URL, or the provider's public endpoint. Never ends with '/'.
    pub fn resolved_api_base(&self) -> String {
        let base = match (&self.api_base, self.provider_type.as_str()) {
            (Some(base), _) => base.as_str(),
            (None, "openai") => OPENAI_API_BASE,
            (None, _) => GEMINI_API_BASE,
        };
        base.trim_end_matches('/').to_string()
    }

    /// Sampling temperature from `options["temperature"]`, if it parses.
    pub fn temperature(&self) -> Option<f32> {
        self.options.get("temperature").and_then(|t| t.parse().ok())
    }

    /// Reject configurations that can never produce a successful call.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.api_key.trim().is_empty() {
            return Err(AnalysisError::Config(format!(
                "no API key configured for provider '{}'",
                self.provider_type
            )));
        }
        if self.default_model.trim().is_empty() {
            return Err(AnalysisError::Config("model name must not be empty".to_string()));
        }
        if let Some(base) = &self.api_base {
            url::Url::parse(base)
                .map_err(|e| AnalysisError::Config(format!("invalid API base '{}': {}", base, e)))?;
        }
        Ok(())
    }
}
