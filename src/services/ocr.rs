use std::process::Stdio;
use std::sync::Arc;

use image::{GenericImageView, ImageFormat};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::errors::AppError;
use crate::services::cleaner::TextCleaner;

/// Trait for OCR backends: image bytes in, raw text out.
#[async_trait::async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, AppError>;
}

/// Runs the `tesseract` command line tool, piping the image through stdin.
pub struct TesseractOcr {
    binary: String,
    language: String,
}

impl TesseractOcr {
    pub fn new(binary: String, language: String) -> Self {
        Self { binary, language }
    }
}

#[async_trait::async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &[u8]) -> Result<String, AppError> {
        log::debug!(
            "🔍 Running {} (lang={}) on {} bytes",
            self.binary,
            self.language,
            image.len()
        );

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::Extraction(format!("failed to start {}: {}", self.binary, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::Extraction("OCR process has no stdin".to_string()))?;
        let data = image.to_vec();
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&data).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| AppError::Extraction(format!("OCR process failed: {}", e)))?;

        if let Ok(Err(e)) = writer.await {
            log::warn!("⚠️ Could not write image to OCR process: {}", e);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!("❌ OCR exited with {}: {}", output.status, stderr.trim());
            return Err(AppError::Extraction(format!(
                "OCR exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// OCR plus cleaning: turns an uploaded label image into prompt-ready text.
pub struct TextExtractor {
    ocr: Arc<dyn OcrEngine>,
    cleaner: TextCleaner,
}

impl TextExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>, cleaner: TextCleaner) -> Self {
        Self { ocr, cleaner }
    }

    /// Accepts PNG and JPEG only. The image is decoded before OCR so corrupt
    /// uploads fail here rather than inside the OCR engine.
    pub async fn extract(&self, image: &[u8]) -> Result<String, AppError> {
        let format = image::guess_format(image)
            .map_err(|_| AppError::Extraction("unrecognized image format".to_string()))?;
        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
            return Err(AppError::Extraction(format!(
                "unsupported image format {:?}, expected PNG or JPEG",
                format
            )));
        }

        let (width, height) = image::load_from_memory_with_format(image, format)?.dimensions();
        log::info!("📸 Label image {:?} {}x{} ({} bytes)", format, width, height, image.len());

        let raw = self.ocr.recognize(image).await?;
        log::debug!("📄 OCR produced {} chars", raw.len());
        Ok(raw)
    }

    pub fn clean(&self, raw: &str) -> String {
        self.cleaner.clean(raw)
    }

    pub async fn extract_and_clean(&self, image: &[u8]) -> Result<String, AppError> {
        let raw = self.extract(image).await?;
        Ok(self.clean(&raw))
    }
}
