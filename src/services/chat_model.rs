use crate::errors::AppError;

/// Trait for hosted chat models (Groq, or a stub in tests).
///
/// One call is one request: implementations must not cache or retry.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;
}
