pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_upload_resume;
use crate::classifier::handlers::handle_predict;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(health::banner_handler))
        .route("/health", get(health::health_handler))
        .route("/upload_resume", post(handle_upload_resume))
        .route("/predict", post(handle_predict))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::report::REPORT_FILE_NAME;
    use crate::catalog::{LearningResource, RoleCatalog};
    use crate::classifier::{sample_dataset, DomainClassifier};
    use crate::config::Config;

    const BOUNDARY: &str = "X-CAREER-ADVISOR-BOUNDARY";

    fn test_state(report_dir: &Path) -> AppState {
        let mut skills = BTreeMap::new();
        skills.insert(
            "Web Developer".to_string(),
            vec![
                "HTML".to_string(),
                "Python".to_string(),
                "Java".to_string(),
                "SQL".to_string(),
                "Node.js".to_string(),
            ],
        );
        let mut links = BTreeMap::new();
        links.insert(
            "Web Developer".to_string(),
            vec![LearningResource {
                title: "MDN".to_string(),
                url: "https://developer.mozilla.org".to_string(),
            }],
        );

        AppState {
            catalog: Arc::new(RoleCatalog::from_maps(skills, links).unwrap()),
            classifier: Arc::new(DomainClassifier::train(&sample_dataset()).unwrap()),
            config: Config {
                report_dir: report_dir.to_path_buf(),
                ..Config::default()
            },
        }
    }

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn multipart_body(role: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(role) = role {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"role\"\r\n\r\n{role}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn upload(state: AppState, body: Vec<u8>) -> Response {
        build_router(state)
            .oneshot(
                Request::post("/upload_resume")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn predict(state: AppState, payload: Value) -> Response {
        build_router(state)
            .oneshot(
                Request::post("/predict")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_banner() {
        let dir = tempfile::tempdir().unwrap();
        let response = build_router(test_state(dir.path()))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("running"));
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = build_router(test_state(dir.path()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_predict_returns_domain() {
        let dir = tempfile::tempdir().unwrap();
        let response = predict(
            test_state(dir.path()),
            json!({"skills": "html, css, javascript"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"predicted_domain": "Web Development"})
        );
    }

    #[tokio::test]
    async fn test_predict_blank_skills_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let response = predict(test_state(dir.path()), json!({"skills": "   "})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_predict_missing_skills_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let response = predict(test_state(dir.path()), json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_missing_role_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(None, Some(("cv.pdf", b"%PDF".as_slice())));
        let response = upload(test_state(dir.path()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["message"], "Missing file or role");
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(Some("Web Developer"), None);
        let response = upload(test_state(dir.path()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_unknown_role_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(Some("Astronaut"), Some(("cv.pdf", b"%PDF".as_slice())));
        let response = upload(test_state(dir.path()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INVALID_ROLE");
    }

    #[tokio::test]
    async fn test_upload_non_pdf_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(Some("web developer"), Some(("cv.docx", b"PK".as_slice())));
        let response = upload(test_state(dir.path()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "UNSUPPORTED_FILE");
    }

    #[tokio::test]
    async fn test_upload_corrupt_pdf_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let body = multipart_body(
            Some("web developer"),
            Some(("cv.pdf", b"not really a pdf".as_slice())),
        );
        let response = upload(test_state(dir.path()), body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "UNREADABLE_DOCUMENT"
        );
        assert!(!dir.path().join(REPORT_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_upload_pdf_that_crashes_parser_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let mut pdf = std::fs::read(fixture("two_page_resume.pdf")).unwrap();
        pdf[285] = b'#';
        let body = multipart_body(Some("web developer"), Some(("cv.pdf", pdf.as_slice())));
        let response = upload(test_state(dir.path()), body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "UNREADABLE_DOCUMENT"
        );
    }

    #[tokio::test]
    async fn test_upload_matches_skills_and_saves_report() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = std::fs::read(fixture("two_page_resume.pdf")).unwrap();
        let body = multipart_body(
            Some("  WEB developer "),
            Some(("resume.pdf", pdf.as_slice())),
        );
        let response = upload(test_state(dir.path()), body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["role"], "Web Developer");
        assert_eq!(json["skills_matched"], json!(["python", "sql", "node.js"]));
        assert_eq!(json["skills_missing"], json!(["HTML", "Java"]));
        assert_eq!(json["resources"][0]["title"], "MDN");

        let saved: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(REPORT_FILE_NAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["role"], "Web Developer");
        assert_eq!(saved["skills_have"], json!(["python", "sql", "node.js"]));
    }
}
