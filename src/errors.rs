use thiserror::Error;

/// Errors raised while turning a label image into advice.
///
/// The kinds stay distinct internally; the page only ever shows
/// [`AppError::user_message`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("text cleaning failed: {0}")]
    Cleaning(String),

    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Message rendered into the page's single error slot.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            other => format!("An Error Occurred: {}", other),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ModelInvocation(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Extraction(err.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Cleaning(err.to_string())
    }
}
