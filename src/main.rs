mod config;
mod errors;
mod handlers;
mod models;
mod services;
mod web;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use config::AppConfig;
use handlers::Session;
use models::StaticProfileSource;
use services::{GroqService, RecommendationEngine, TesseractOcr, TextCleaner, TextExtractor};
use web::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the logger reads RUST_LOG
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Health Recommendation Generator...");

    let config = AppConfig::from_env();

    let groq = Arc::new(GroqService::new(
        config.groq_api_key.clone(),
        config.groq_model.clone(),
        config.groq_base_url.clone(),
    ));
    log::info!("✅ Groq service initialized with model: {}", groq.model());

    let ocr = Arc::new(TesseractOcr::new(
        config.tesseract_bin.clone(),
        config.tesseract_lang.clone(),
    ));
    let cleaner = TextCleaner::new().context("failed to build text cleaner")?;
    let extractor = Arc::new(TextExtractor::new(ocr, cleaner));
    log::info!("✅ OCR initialized ({} -l {})", config.tesseract_bin, config.tesseract_lang);

    let session = Session::new(
        extractor,
        Arc::new(RecommendationEngine::new(groq)),
        Arc::new(StaticProfileSource),
    );

    let app = create_router(session, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    log::info!("🌐 Listening on http://{}", config.bind_addr);
    println!("\n🥗 Health Recommendation Generator is running!");
    println!("🌐 Open http://{} and upload a nutrition label", config.bind_addr);
    println!("\n🛑 Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("🛑 Shutting down...");
        })
        .await
        .context("server error")?;

    Ok(())
}
