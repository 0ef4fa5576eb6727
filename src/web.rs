pub mod page;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Form, Multipart, State},
    http::{header, HeaderMap},
    response::Html,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::handlers::Session;

/// The one interactive session. The lock is held for a whole event, so
/// an upload and a submit never interleave.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

pub fn create_router(session: Session, max_upload_bytes: usize) -> Router {
    let state = AppState {
        session: Arc::new(Mutex::new(session)),
        max_upload_bytes,
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/upload", post(upload_handler))
        .route("/query", post(query_handler))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(page::render(session.view()))
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Html<String> {
    let mut session = state.session.lock().await;

    // Oversized uploads land in the error slot like any other failed upload.
    if let Some(len) = declared_length(&headers).filter(|len| *len > state.max_upload_bytes) {
        session.fail_upload(AppError::Extraction(format!(
            "upload is {} bytes, the limit is {} bytes",
            len, state.max_upload_bytes
        )));
        return Html(page::render(session.view()));
    }

    let mut image = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("image") {
                    continue;
                }
                log::debug!(
                    "📎 Upload field: filename={:?}, type={:?}",
                    field.file_name(),
                    field.content_type()
                );
                match field.bytes().await {
                    Ok(bytes) => image = Some(bytes),
                    Err(e) => {
                        session.fail_upload(AppError::Extraction(format!(
                            "could not read upload: {}",
                            e
                        )));
                        return Html(page::render(session.view()));
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                session.fail_upload(AppError::Extraction(format!(
                    "could not read upload: {}",
                    e
                )));
                return Html(page::render(session.view()));
            }
        }
    }

    match image {
        Some(bytes) if !bytes.is_empty() => session.handle_upload(&bytes).await,
        _ => log::info!("ℹ️ Upload form submitted without a file"),
    }

    Html(page::render(session.view()))
}

async fn query_handler(State(state): State<AppState>, Form(form): Form<QueryForm>) -> Html<String> {
    let mut session = state.session.lock().await;
    session.handle_query(&form.query).await;
    Html(page::render(session.view()))
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::session::tests::session_with;
    use crate::handlers::session::EMPTY_QUERY_MESSAGE;
    use crate::models::StaticProfileSource;
    use crate::services::ocr::tests::encode;
    use crate::services::recommendation::tests::StubModel;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use image::ImageFormat;
    use tower::ServiceExt;

    const BOUNDARY: &str = "label-upload-boundary";

    fn router(model: Arc<StubModel>) -> Router {
        let session = session_with("Sugar 5g Protein 10g", model, Arc::new(StaticProfileSource));
        create_router(session, 1024 * 1024)
    }

    fn multipart_body(bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{}\r\n\
             Content-Disposition: form-data; name=\"image\"; filename=\"label.png\"\r\n\
             Content-Type: image/png\r\n\r\n",
            BOUNDARY
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(bytes: &[u8]) -> Request<Body> {
        let body = multipart_body(bytes);
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap()
    }

    fn query_request(encoded: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/query")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encoded.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = router(Arc::new(StubModel::replying("ok")));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_index_renders_uploader() {
        let app = router(Arc::new(StubModel::replying("ok")));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Personalized Health Recommendation Generator"));
        assert!(!html.contains("action=\"/query\""));
    }

    #[tokio::test]
    async fn test_upload_then_query() {
        let model = Arc::new(StubModel::replying("Good protein source."));
        let app = router(model.clone());

        let response = app
            .clone()
            .oneshot(upload_request(&encode(ImageFormat::Png)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Good protein source."));
        assert!(html.contains("action=\"/query\""));
        assert_eq!(model.calls(), 1);

        let response = app
            .oneshot(query_request("query=Is+it+low+sugar%3F"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Response to Your Query:"));
        assert_eq!(model.calls(), 2);
        assert!(model.last_prompt().unwrap().contains("### USER QUERY:\nIs it low sugar?\n"));
    }

    #[tokio::test]
    async fn test_empty_query_shows_validation() {
        let model = Arc::new(StubModel::replying("ok"));
        let app = router(model.clone());

        app.clone()
            .oneshot(upload_request(&encode(ImageFormat::Png)))
            .await
            .unwrap();

        let response = app.oneshot(query_request("query=")).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains(EMPTY_QUERY_MESSAGE));
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_oversized_upload_shows_error_page() {
        let model = Arc::new(StubModel::replying("ok"));
        let session = session_with("Fat 3g", model.clone(), Arc::new(StaticProfileSource));
        let app = create_router(session, 64);

        let response = app
            .oneshot(upload_request(&encode(ImageFormat::Png)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches("class=\"error\"").count(), 1);
        assert!(html.contains("An Error Occurred: text extraction failed: upload is"));
        assert!(html.contains("action=\"/query\""));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_without_length_shows_error_page() {
        let model = Arc::new(StubModel::replying("ok"));
        let session = session_with("Fat 3g", model.clone(), Arc::new(StaticProfileSource));
        let app = create_router(session, 64);

        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(&encode(ImageFormat::Png))))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("An Error Occurred: text extraction failed: could not read upload"));
        assert!(html.contains("action=\"/query\""));
        assert_eq!(model.calls(), 0);
    }
}
