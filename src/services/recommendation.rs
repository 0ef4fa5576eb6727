use std::sync::Arc;

use crate::errors::AppError;
use crate::models::HealthProfile;
use crate::services::prompts::{analysis_prompt, query_prompt, PromptParams};
use crate::services::ChatModel;

/// Renders the prompt templates and sends them to the chat model.
///
/// Stateless: nothing from one call is carried into the next.
pub struct RecommendationEngine {
    model: Arc<dyn ChatModel>,
}

impl RecommendationEngine {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn analyze_nutrients(
        &self,
        nutrient_data: &str,
        profile: &HealthProfile,
    ) -> Result<String, AppError> {
        log::info!(
            "🥗 Generating recommendation ({} chars of label text)",
            nutrient_data.len()
        );
        let prompt = analysis_prompt(&PromptParams::new(nutrient_data, profile));
        self.model.complete(&prompt).await
    }

    pub async fn handle_user_query(
        &self,
        nutrient_data: &str,
        profile: &HealthProfile,
        user_query: &str,
    ) -> Result<String, AppError> {
        log::info!("❓ Answering user query: {}", user_query);
        let params = PromptParams::new(nutrient_data, profile).with_query(user_query);
        let prompt = query_prompt(&params);
        self.model.complete(&prompt).await
    }
}
