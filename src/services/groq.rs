use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::ChatModel;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

/// Groq chat-completions client (OpenAI-compatible API).
pub struct GroqService {
    api_key: Option<String>,
    model: String,
    base_url: String,
    temperature: f32,
    client: reqwest::Client,
}

impl GroqService {
    /// Temperature is pinned to zero so recommendations stay deterministic.
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature: 0.0,
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait::async_trait]
impl ChatModel for GroqService {
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::ModelInvocation("GROQ_API_KEY is not set".to_string()))?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        log::info!("🤖 Sending request to Groq with model: {}", self.model);
        log::debug!("📤 Prompt size: {} bytes", prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Groq response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Groq API error ({}): {}", status, error_text);
            return Err(AppError::ModelInvocation(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| AppError::ModelInvocation(format!("malformed response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::ModelInvocation("response had no choices".to_string()))?;

        log::info!("✅ Received completion ({} chars)", content.len());
        Ok(content)
    }
}
