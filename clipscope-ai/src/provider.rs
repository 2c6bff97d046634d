use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};

use clipscope_common::AnalysisError;

use crate::models::ProviderConfig;
use crate::prompt::response_schema;
use crate::traits::ModelProvider;

/// Send a request and decode its JSON body, turning HTTP and API errors into
/// `AnalysisError::Service` with the provider's own message when it has one.
async fn send_json(request: RequestBuilder) -> Result<Value, AnalysisError> {
    let response = request.send().await?;
    let status = response.status();

    // Get the raw response text first for better error handling
    let response_text = response.text().await?;
    tracing::debug!("Raw API response ({}): {}", status, response_text);

    let data = match serde_json::from_str::<Value>(&response_text) {
        Ok(json) => json,
        Err(e) if status.is_success() => {
            tracing::error!("Failed to parse API response as JSON: {:?}", e);
            return Err(AnalysisError::Malformed(format!("API returned non-JSON response: {}", e)));
        }
        Err(_) => Value::Null,
    };

    if let Some(error) = data.get("error") {
        tracing::error!("API returned error: {:?}", error);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(AnalysisError::Service(message));
    }

    if !status.is_success() {
        tracing::error!("API returned HTTP {}: {}", status, response_text);
        return Err(AnalysisError::Service(format!("analysis service returned HTTP {}", status)));
    }

    Ok(data)
}

/// Google Gemini provider (generateContent with a JSON response schema)
pub struct GeminiProvider {
    config: ProviderConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    /// Request payload for one analysis call.
    pub fn request_body(&self, system: &str, prompt: &str) -> Value {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        });
        if let Some(temperature) = self.config.temperature() {
            generation_config["temperature"] = json!(temperature);
        }

        json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        })
    }

    /// Pull the generated text out of a generateContent response.
    pub fn extract_text(data: &Value) -> Result<String, AnalysisError> {
        let candidates = data.get("candidates").and_then(|c| c.as_array());

        let first = match candidates.and_then(|c| c.first()) {
            Some(first) => first,
            None => {
                if let Some(reason) = data
                    .get("promptFeedback")
                    .and_then(|f| f.get("blockReason"))
                    .and_then(|r| r.as_str())
                {
                    return Err(AnalysisError::Service(format!("request was blocked: {}", reason)));
                }
                tracing::error!("Response missing 'candidates': {:?}", data);
                return Err(AnalysisError::Malformed("response has no candidates".to_string()));
            }
        };

        let text: String = first
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            tracing::error!("Candidate carried no text: {:?}", first);
            return Err(AnalysisError::Malformed("response candidate has no text".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_json(&self, system: &str, prompt: &str) -> Result<String, AnalysisError> {
        let api_base = self.config.resolved_api_base();
        let endpoint = format!("{}/models/{}:generateContent", api_base, self.config.default_model);

        tracing::info!("Making API call to {}", endpoint);

        let request = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&self.request_body(system, prompt));

        let data = send_json(request).await?;
        Self::extract_text(&data)
    }
}

/// OpenAI provider implementation (chat completions in JSON mode)
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    pub fn request_body(&self, system: &str, prompt: &str) -> Value {
        let mut request_payload = json!({
            "model": self.config.default_model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
            "response_format": { "type": "json_object" },
            "max_tokens": 1000,
        });
        if let Some(temperature) = self.config.temperature() {
            request_payload["temperature"] = json!(temperature);
        }
        request_payload
    }

    pub fn extract_text(data: &Value) -> Result<String, AnalysisError> {
        let choices = match data.get("choices").and_then(|c| c.as_array()) {
            Some(choices) if !choices.is_empty() => choices,
            Some(_) => {
                tracing::error!("API returned empty choices array");
                return Err(AnalysisError::Malformed("no completions returned".to_string()));
            }
            None => {
                tracing::error!("Response missing 'choices' array: {:?}", data);
                return Err(AnalysisError::Malformed("response missing 'choices' array".to_string()));
            }
        };

        let message = choices[0].get("message").ok_or_else(|| {
            tracing::error!("First choice missing 'message': {:?}", choices[0]);
            AnalysisError::Malformed("response choice missing 'message'".to_string())
        })?;

        if let Some(refusal) = message.get("refusal").and_then(|r| r.as_str()) {
            return Err(AnalysisError::Service(refusal.to_string()));
        }

        message
            .get("content")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                tracing::error!("Message missing 'content': {:?}", message);
                AnalysisError::Malformed("response message missing 'content'".to_string())
            })
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate_json(&self, system: &str, prompt: &str) -> Result<String, AnalysisError> {
        let api_base = self.config.resolved_api_base();

        tracing::info!("Making API call to {}/chat/completions", api_base);

        let request = self
            .client
            .post(format!("{}/chat/completions", api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&self.request_body(system, prompt));

        let data = send_json(request).await?;
        Self::extract_text(&data)
    }
}

/// Factory for creating AI providers
pub struct Provider;

impl Provider {
    /// Build the provider named by `config.provider_type`.
    pub fn from_config(config: ProviderConfig) -> Result<Arc<dyn ModelProvider>, AnalysisError> {
        config.validate()?;
        match config.provider_type.to_lowercase().as_str() {
            "gemini" | "google" => Ok(Arc::new(Self::create_gemini(config))),
            "openai" => Ok(Arc::new(Self::create_openai(config))),
            other => Err(AnalysisError::Config(format!("unknown provider type '{}'", other))),
        }
    }

    /// Create a Gemini provider from a configuration
    pub fn create_gemini(config: ProviderConfig) -> GeminiProvider {
        GeminiProvider::new(config)
    }

    /// Create an OpenAI provider from a configuration
    pub fn create_openai(config: ProviderConfig) -> OpenAIProvider {
        OpenAIProvider::new(config)
    }
}
