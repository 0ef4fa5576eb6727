use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{HealthProfile, ProfileSource};
use crate::services::{RecommendationEngine, TextExtractor};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a question or concern.";
pub const NO_LABEL_MESSAGE: &str = "Please upload a product nutrient page image first.";

/// Everything the page needs to render the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub uploaded: bool,
    pub recommendation: Option<String>,
    pub query_response: Option<String>,
    pub last_query: Option<String>,
    pub error: Option<String>,
}

/// One interactive session: upload a label, read the advice, ask follow-ups.
pub struct Session {
    extractor: Arc<TextExtractor>,
    engine: Arc<RecommendationEngine>,
    profile_source: Arc<dyn ProfileSource>,
    profile: HealthProfile,
    profile_loaded: bool,
    nutrient_text: Option<String>,
    view: SessionView,
}

impl Session {
    pub fn new(
        extractor: Arc<TextExtractor>,
        engine: Arc<RecommendationEngine>,
        profile_source: Arc<dyn ProfileSource>,
    ) -> Self {
        Self {
            extractor,
            engine,
            profile_source,
            profile: HealthProfile::default(),
            profile_loaded: false,
            nutrient_text: None,
            view: SessionView::default(),
        }
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    #[cfg(test)]
    pub fn profile(&self) -> &HealthProfile {
        &self.profile
    }

    #[cfg(test)]
    pub fn nutrient_text(&self) -> Option<&str> {
        self.nutrient_text.as_deref()
    }

    /// Upload event. Any failure lands in the error slot; the session stays usable.
    pub async fn handle_upload(&mut self, image: &[u8]) {
        log::info!("📨 Upload received ({} bytes)", image.len());

        self.view = SessionView {
            uploaded: true,
            ..SessionView::default()
        };
        self.nutrient_text = None;

        match self.analyze(image).await {
            Ok(recommendation) => {
                log::info!("✅ Recommendation ready");
                self.view.recommendation = Some(recommendation);
            }
            Err(e) => self.report(e),
        }
    }

    /// Upload event whose body could not even be read.
    pub fn fail_upload(&mut self, err: AppError) {
        self.view = SessionView {
            uploaded: true,
            ..SessionView::default()
        };
        self.nutrient_text = None;
        self.report(err);
    }

    /// Submit event for the follow-up question box.
    pub async fn handle_query(&mut self, input: &str) {
        self.view.query_response = None;
        self.view.error = None;
        self.view.last_query = Some(input.to_string());

        match self.answer(input.trim()).await {
            Ok(response) => {
                log::info!("✅ Query answered");
                self.view.query_response = Some(response);
            }
            Err(e) => self.report(e),
        }
    }

    async fn analyze(&mut self, image: &[u8]) -> Result<String, AppError> {
        let cleaned = self.extractor.extract_and_clean(image).await?;
        self.nutrient_text = Some(cleaned.clone());

        if !self.profile_loaded {
            self.profile.load_profile(self.profile_source.as_ref());
            self.profile_loaded = true;
            log::debug!("👤 Health profile loaded: {:?}", self.profile);
        }

        self.engine.analyze_nutrients(&cleaned, &self.profile).await
    }

    async fn answer(&self, query: &str) -> Result<String, AppError> {
        if query.is_empty() {
            return Err(AppError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
        }
        let nutrient_text = self
            .nutrient_text
            .as_deref()
            .ok_or_else(|| AppError::Validation(NO_LABEL_MESSAGE.to_string()))?;

        self.engine
            .handle_user_query(nutrient_text, &self.profile, query)
            .await
    }

    fn report(&mut self, err: AppError) {
        if err.is_validation() {
            log::warn!("⚠️ {}", err);
        } else {
            log::error!("❌ {}", err);
        }
        self.view.error = Some(err.user_message());
    }
}
