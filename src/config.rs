use std::env;

use crate::services::groq::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8501";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: String,
    pub bind_addr: String,
    pub tesseract_bin: String,
    pub tesseract_lang: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let groq_api_key = lookup("GROQ_API_KEY").filter(|v| !v.trim().is_empty());
        if groq_api_key.is_none() {
            log::warn!("⚠️ GROQ_API_KEY not set, model calls will fail");
        }

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                log::warn!(
                    "⚠️ Invalid MAX_UPLOAD_BYTES '{}', using {}",
                    raw,
                    DEFAULT_MAX_UPLOAD_BYTES
                );
                DEFAULT_MAX_UPLOAD_BYTES
            }),
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Self {
            groq_api_key,
            groq_model: var("GROQ_MODEL", DEFAULT_MODEL),
            groq_base_url: var("GROQ_BASE_URL", DEFAULT_BASE_URL),
            bind_addr: var("BIND_ADDR", DEFAULT_BIND_ADDR),
            tesseract_bin: var("TESSERACT_BIN", "tesseract"),
            tesseract_lang: var("TESSERACT_LANG", "eng"),
            max_upload_bytes,
        }
    }
}
