// tests/client_tests.rs

use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use clipscope_ai::{AnalysisClient, ModelProvider};
use clipscope_common::{AnalysisApi, AnalysisError, Platform};

// ---------- Mock Provider ----------
struct MockProvider {
    reply: Result<String, String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    fn replying(reply: Result<&str, &str>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(vec![]));
        let provider = Self {
            reply: reply.map(str::to_string).map_err(str::to_string),
            prompts: prompts.clone(),
        };
        (provider, prompts)
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_json(&self, _system: &str, prompt: &str) -> Result<String, AnalysisError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(AnalysisError::Service)
    }
}

#[tokio::test]
async fn test_analyze_issues_one_request_and_normalizes() {
    let (provider, prompts) = MockProvider::replying(Ok(
        r#"{"title":"Cat video","platform":"TikTok","author":"x","summary":"A cat.","tags":["cats","funny"],"sentimentScore":80}"#,
    ));
    let client = AnalysisClient::new(Arc::new(provider));

    let analysis = client.analyze("https://tiktok.com/@x/123").await.unwrap();
    assert_eq!(analysis.platform, Platform::TikTok);
    assert_eq!(analysis.sentiment_score, 80);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("https://tiktok.com/@x/123"));
}

#[tokio::test]
async fn test_service_error_is_passed_through_verbatim() {
    let (provider, prompts) = MockProvider::replying(Err("timeout"));
    let client = AnalysisClient::new(Arc::new(provider));

    let err = client.analyze("https://tiktok.com/@x/123").await.unwrap_err();
    assert_eq!(err.to_string(), "timeout");
    assert_eq!(prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_partial_response_is_an_error() {
    let (provider, _) = MockProvider::replying(Ok(r#"{"title":"Only a title"}"#));
    let client = AnalysisClient::new(Arc::new(provider));

    assert!(matches!(
        client.analyze("https://youtu.be/abc").await,
        Err(AnalysisError::Malformed(_))
    ));
    assert_eq!(client.provider_name(), "mock");
}
