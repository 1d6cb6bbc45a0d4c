use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use exam_generator::infrastructure::mock::ScriptedTextModel;
use exam_generator::infrastructure::LexiconTagger;
use exam_generator::{App, Config, ModelContext};

const BOUNDARY: &str = "exam-generator-test-boundary";

fn app_with_models() -> Router {
    let models = ModelContext::new(
        Arc::new(LexiconTagger::new()),
        Arc::new(ScriptedTextModel::new()),
        Arc::new(ScriptedTextModel::new()),
    );
    App::with_models(Config::default(), Some(models)).router()
}

fn app_with(config: Config, question_model: ScriptedTextModel) -> Router {
    let models = ModelContext::new(
        Arc::new(LexiconTagger::new()),
        Arc::new(question_model),
        Arc::new(ScriptedTextModel::new()),
    );
    App::with_models(config, Some(models)).router()
}

fn app_without_models() -> Router {
    App::with_models(Config::default(), None).router()
}

/// 手工拼装 multipart 请求体
fn multipart_request(uri: &str, fields: &[(&str, &str)], file: Option<(&str, &str)>) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    if let Some((file_name, content)) = file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_root_reports_running() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app_without_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "AI Question Generator API is running");
}

#[tokio::test]
async fn test_generate_without_models_is_unavailable() {
    let request = multipart_request("/generate", &[], Some(("notes.txt", "The cat sat on the mat.")));
    let (status, body) = send(app_without_models(), request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_generate_single_mcq() {
    let request = multipart_request(
        "/generate",
        &[("count", "1"), ("difficulty", "easy")],
        Some(("notes.txt", "The cat sat on the mat. The dog ran in the park.")),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record["id"], 1);
    assert_eq!(record["type"], "mcq");
    let options = record["options"].as_array().unwrap();
    assert_eq!(options.len(), 4);
    let correct = record["correct"].as_u64().unwrap() as usize;
    let answer = options[correct].as_str().unwrap();
    assert!(["cat", "mat", "dog", "park"].contains(&answer));
    assert!(record.get("context").is_none());
}

#[tokio::test]
async fn test_generate_value_answer_form_with_context() {
    let text = "The cat sat on the mat. The dog ran in the park.";
    let request = multipart_request(
        "/generate",
        &[("count", "1"), ("answer_form", "value"), ("include_context", "true")],
        Some(("notes.txt", text)),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    let record = &body[0];
    assert!(record.get("correct").is_none());
    assert!(record["options"]
        .as_array()
        .unwrap()
        .contains(&record["answer"]));
    assert_eq!(record["context"], text);
}

#[tokio::test]
async fn test_generate_open_questions_only() {
    let request = multipart_request(
        "/generate",
        &[("mcq", "false"), ("short", "true")],
        Some((
            "notes.txt",
            "Photosynthesis converts light into chemical energy. \
             Mitochondria release stored energy during cellular respiration.",
        )),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["type"] == "short" && r.get("options").is_none()));
}

#[tokio::test]
async fn test_generate_rejects_bad_input() {
    let missing_file = multipart_request("/generate", &[("count", "3")], None);
    let (status, body) = send(app_with_models(), missing_file).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let blank_file = multipart_request("/generate", &[], Some(("empty.txt", "  \n\n  ")));
    let (status, _) = send(app_with_models(), blank_file).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_count = multipart_request("/generate", &[("count", "lots")], Some(("notes.txt", "Text.")));
    let (status, _) = send(app_with_models(), bad_count).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summarize_text_field() {
    let request = multipart_request(
        "/api/summarize",
        &[("text", "First point. Second point. Third point.")],
        None,
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "First point. Second point.");
}

#[tokio::test]
async fn test_summarize_uploaded_file() {
    let request = multipart_request(
        "/api/summarize",
        &[],
        Some(("lecture.txt", "Rust has ownership. Borrowing is checked. Lifetimes too.")),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Rust has ownership. Borrowing is checked.");
}

#[tokio::test]
async fn test_summarize_requires_content() {
    let request = multipart_request("/api/summarize", &[], None);
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_generate_accepts_mixed_difficulty() {
    let request = multipart_request(
        "/generate",
        &[("count", "1"), ("difficulty", "mixed")],
        Some(("notes.txt", "The cat sat on the mat. The dog ran in the park.")),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_dir_is_empty_after_requests() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        upload_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..Config::default()
    };
    let uploads = || std::fs::read_dir(dir.path()).unwrap().count();

    let ok = multipart_request(
        "/generate",
        &[("count", "1")],
        Some(("notes.txt", "The cat sat on the mat. The dog ran in the park.")),
    );
    let (status, _) = send(app_with(config.clone(), ScriptedTextModel::new()), ok).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(uploads(), 0);

    let model_down = multipart_request(
        "/generate",
        &[("count", "1")],
        Some(("notes.txt", "The cat sat on the mat. The dog ran in the park.")),
    );
    let app = app_with(config.clone(), ScriptedTextModel::failing("inference server down"));
    let (status, body) = send(app, model_down).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].is_string());
    assert_eq!(uploads(), 0);

    let blank = multipart_request("/generate", &[], Some(("empty.txt", "  \n\n  ")));
    let (status, _) = send(app_with(config, ScriptedTextModel::new()), blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(uploads(), 0);
}

#[tokio::test]
async fn test_per_chunk_mcq() {
    let text = "The cat sat on the mat. The dog ran in the park.";
    let request = multipart_request(
        "/api/generate",
        &[("num_questions", "1"), ("mode", "mcq")],
        Some(("notes.txt", text)),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);

    let result = &results[0];
    assert_eq!(result["type"], "mcq");
    assert!(result["question"].is_string());
    let options = result["options"].as_array().unwrap();
    assert_eq!(options.len(), 4);
    assert!(options.contains(&result["answer"]));
    assert_eq!(result["context"], text);
}

#[tokio::test]
async fn test_per_chunk_qa() {
    let text = "Photosynthesis converts light into chemical energy. \
                Mitochondria release stored energy during cellular respiration.";
    let request = multipart_request(
        "/api/generate",
        &[("num_questions", "2"), ("mode", "qa")],
        Some(("notes.txt", text)),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty() && results.len() <= 2);
    for result in results {
        assert_eq!(result["type"], "qa");
        assert!(result.get("options").is_none());
        assert!(result.get("answer").is_none());
        assert_eq!(result["context"], text);
    }
}

#[tokio::test]
async fn test_per_chunk_rejects_unknown_mode() {
    let request = multipart_request(
        "/api/generate",
        &[("mode", "essay")],
        Some(("notes.txt", "The cat sat on the mat.")),
    );
    let (status, body) = send(app_with_models(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_per_chunk_without_models_is_unavailable() {
    let request = multipart_request(
        "/api/generate",
        &[],
        Some(("notes.txt", "The cat sat on the mat.")),
    );
    let (status, _) = send(app_without_models(), request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
