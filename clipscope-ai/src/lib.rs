pub mod client;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod response;
pub mod traits;

// Re-export public APIs
pub use client::AnalysisClient;
pub use models::ProviderConfig;
pub use provider::{GeminiProvider, OpenAIProvider, Provider};
pub use response::parse_analysis;
pub use traits::ModelProvider;
