use regex::Regex;

use crate::errors::AppError;

/// Strips OCR noise from label text.
pub struct TextCleaner {
    tags: Regex,
    urls: Regex,
    noise: Regex,
    spaces: Regex,
}

impl TextCleaner {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            // Tags start with a letter or '/', so "<1g" survives
            tags: Regex::new(r"</?[A-Za-z][^>]*>")?,
            urls: Regex::new(r"https?://\S+")?,
            // Keep the punctuation nutrition labels rely on (2.5g, 10%, 1/2 cup, Fat: 3g, <1g)
            noise: Regex::new(r"[^\p{L}\p{N}\s.,%()/:<\-]")?,
            spaces: Regex::new(r"\s+")?,
        })
    }

    pub fn clean(&self, raw: &str) -> String {
        let text = self.tags.replace_all(raw, "");
        let text = self.urls.replace_all(&text, "");
        let text = self.noise.replace_all(&text, "");
        let text = self.spaces.replace_all(&text, " ");
        text.trim().to_string()
    }
}
