use crate::models::HealthProfile;

/// Values substituted into the prompt templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParams {
    pub nutrient_data: String,
    pub allergies: String,
    pub restrictions: String,
    pub user_query: Option<String>,
}

impl PromptParams {
    pub fn new(nutrient_data: &str, profile: &HealthProfile) -> Self {
        Self {
            nutrient_data: nutrient_data.to_string(),
            allergies: profile.allergies_joined(),
            restrictions: profile.restrictions_joined(),
            user_query: None,
        }
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.user_query = Some(query.to_string());
        self
    }
}

/// Initial recommendation prompt. Asks for the answer with no preamble.
pub fn analysis_prompt(params: &PromptParams) -> String {
    format!(
        "### NUTRIENT DATA:\n\
         {}\n\
         \n\
         ### HEALTH PROFILE:\n\
         Allergies: {}\n\
         Dietary restrictions: {}\n\
         \n\
         ### INSTRUCTION:\n\
         Based on the nutrient data and the health profile, provide personalized recommendations\n\
         including potential benefits and risks. If relevant, suggest alternatives or usage limitations.\n\
         ### RECOMMENDATION (NO PREAMBLE):\n",
        params.nutrient_data, params.allergies, params.restrictions
    )
}

/// Follow-up question prompt.
pub fn query_prompt(params: &PromptParams) -> String {
    format!(
        "### NUTRIENT DATA:\n\
         {}\n\
         \n\
         ### HEALTH PROFILE:\n\
         Allergies: {}\n\
         Dietary restrictions: {}\n\
         \n\
         ### USER QUERY:\n\
         {}\n\
         \n\
         ### INSTRUCTION:\n\
         Based on the above information, answer the user's query about the product.\n",
        params.nutrient_data,
        params.allergies,
        params.restrictions,
        params.user_query.as_deref().unwrap_or("")
    )
}
