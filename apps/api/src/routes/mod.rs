pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template API
        .route("/api/v1/templates", get(handlers::handle_templates))
        // Resume API
        .route("/api/v1/resumes/generate", post(handlers::handle_generate))
        .route("/api/v1/resumes/pdf", post(handlers::handle_generate_pdf))
        .route("/api/v1/resumes/render", post(handlers::handle_render))
        .route("/api/v1/resumes/parse", post(handlers::handle_parse))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{Config, EmbeddingProvider};
    use crate::generation::form::sample_form;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::templates::{HashingEmbedder, TemplateRetriever};

    const GENERATED: &str = "Jane Doe\njane@example.com | +1 555 123 4567\n\
        SUMMARY\nBackend engineer.\n\
        EXPERIENCE\nSoftware Developer | Tech Corp | 2020-2023\n• Developed web applications\n\
        SKILLS\nLanguages: Python, Go, Rust";

    struct CannedGenerator(Option<&'static str>);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.0.map(str::to_string).ok_or(LlmError::EmptyContent)
        }
    }

    fn app(dir: &Path, reply: Option<&'static str>) -> Router {
        let config = Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            template_index_dir: dir.to_path_buf(),
            generation_timeout: Duration::from_secs(5),
            embedding_provider: EmbeddingProvider::Local,
        };
        let templates = Arc::new(TemplateRetriever::new(
            dir.to_path_buf(),
            Arc::new(HashingEmbedder::default()),
        ));
        build_router(AppState {
            config,
            llm: Arc::new(CannedGenerator(reply)),
            templates,
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_generate_returns_text_and_structure() {
        let dir = tempfile::tempdir().unwrap();
        let form = serde_json::to_value(sample_form()).unwrap();
        let response = app(dir.path(), Some(GENERATED))
            .oneshot(post_json("/api/v1/resumes/generate", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["resume_text"], GENERATED);
        assert_eq!(body["parsed_resume"]["name"], "Jane Doe");
        assert_eq!(
            body["parsed_resume"]["sections"]["EXPERIENCE"]["entries"][0]["header"],
            "Software Developer | Tech Corp — 2020-2023"
        );
        assert_eq!(
            body["parsed_resume"]["sections"].as_object().unwrap().len(),
            7
        );
    }

    #[tokio::test]
    async fn test_generate_rejects_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut form = serde_json::to_value(sample_form()).unwrap();
        form["phone"] = json!("");
        let response = app(dir.path(), Some(GENERATED))
            .oneshot(post_json("/api/v1/resumes/generate", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["message"], "Please fill in all required fields.");
    }

    #[tokio::test]
    async fn test_generation_failure_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let form = serde_json::to_value(sample_form()).unwrap();
        let response = app(dir.path(), None)
            .oneshot(post_json("/api/v1/resumes/pdf", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "GENERATION_ERROR");
        assert_eq!(body["error"]["message"], "Error generating resume");
    }

    #[tokio::test]
    async fn test_pdf_download() {
        let dir = tempfile::tempdir().unwrap();
        let form = serde_json::to_value(sample_form()).unwrap();
        let response = app(dir.path(), Some(GENERATED))
            .oneshot(post_json("/api/v1/resumes/pdf", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Doe_resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_render_uses_parsed_name_for_filename() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), None)
            .oneshot(post_json(
                "/api/v1/resumes/render",
                json!({ "resume_text": "Ada Lovelace\nSKILLS\nMathematics" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Ada_Lovelace_resume.pdf\""
        );
    }

    #[tokio::test]
    async fn test_render_rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), None)
            .oneshot(post_json("/api/v1/resumes/render", json!({ "resume_text": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), None)
            .oneshot(post_json(
                "/api/v1/resumes/parse",
                json!({ "resume_text": "EDUCATION: BS Computer Science, 2020" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["sections"]["EDUCATION"]["paragraphs"][0],
            "BS Computer Science, 2020"
        );
    }

    #[tokio::test]
    async fn test_templates_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), None)
            .oneshot(
                Request::get("/api/v1/templates?field=Finance&k=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["query"], "Resume template for Finance");
        let templates = body["templates"].as_array().unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0]["field_label"], "Finance");
    }
}
