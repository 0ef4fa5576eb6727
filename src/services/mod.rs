pub mod chat_model;
pub mod cleaner;
pub mod groq; // Groq chat completions (OpenAI compatible)
pub mod ocr; // Tesseract OCR + extraction pipeline
pub mod prompts;
pub mod recommendation;

pub use chat_model::ChatModel;
pub use cleaner::TextCleaner;
pub use groq::GroqService;
pub use ocr::{TesseractOcr, TextExtractor};
pub use recommendation::RecommendationEngine;
