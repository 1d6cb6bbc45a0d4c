//! HTTP 处理函数
//!
//! 只负责解析请求、调用流程层、组织响应；出题逻辑全部在 workflow 中

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult, InputError};
use crate::infrastructure::DataSource;
use crate::models::{ChunkQuestion, QuestionRecord};
use crate::orchestrator::form::{Upload, UploadForm};
use crate::orchestrator::state::AppState;
use crate::utils::logging::{log_request, log_request_complete};
use crate::utils::truncate_text;

/// 健康检查响应文本
pub const RUNNING_MESSAGE: &str = "AI Question Generator API is running";

#[derive(Debug, Serialize)]
pub struct ChunkQuestionsResponse {
    pub results: Vec<ChunkQuestion>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("❌ 请求失败 ({}): {}", status.as_u16(), self);
        } else {
            warn!("⚠️ 请求被拒绝 ({}): {}", status.as_u16(), self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// `GET /`
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": RUNNING_MESSAGE }))
}

/// `POST /generate`
pub async fn generate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<Vec<QuestionRecord>>> {
    let services = state.services()?;
    let form = UploadForm::read(&mut multipart).await?;
    let upload = form.file.as_ref().ok_or(InputError::MissingFile)?;
    let request = form.exam_request(state.config.default_question_count)?;

    let ctx = state.next_ctx(&upload.file_name);
    log_request(&ctx, request.count, &request.types_label());

    let text = read_upload(upload, upload_dir(&state)).await?;
    info!("{} 📖 提取文本 {} 字符", ctx, text.chars().count());

    let records = services.assembler.assemble(&text, &request, &ctx).await?;
    log_request_complete(&ctx, records.len(), request.count);

    Ok(Json(records))
}

/// `POST /api/generate`
///
/// 逐块出题：`num_questions` 为每块的题数，`mode` 为 `mcq` 或 `qa`
pub async fn generate_per_chunk(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<ChunkQuestionsResponse>> {
    let services = state.services()?;
    let form = UploadForm::read(&mut multipart).await?;
    let upload = form.file.as_ref().ok_or(InputError::MissingFile)?;
    let request = form.chunk_request()?;

    let ctx = state.next_ctx(&upload.file_name);
    info!(
        "{} 📥 收到逐块出题请求: 每块 {} 道, 模式 {:?}",
        ctx, request.num_questions, request.mode
    );

    let text = read_upload(upload, upload_dir(&state)).await?;
    let results = services
        .assembler
        .assemble_per_chunk(&text, &request, &ctx)
        .await?;
    info!("{} ✓ 逐块出题完成: {} 道", ctx, results.len());

    Ok(Json(ChunkQuestionsResponse { results }))
}

/// `POST /api/summarize`
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<SummaryResponse>> {
    let services = state.services()?;
    let form = UploadForm::read(&mut multipart).await?;

    let text = match (&form.file, form.field("text")) {
        (Some(upload), _) => read_upload(upload, upload_dir(&state)).await?,
        (None, Some(text)) if !text.trim().is_empty() => text.to_string(),
        (None, Some(_)) => return Err(InputError::EmptyDocument.into()),
        (None, None) => return Err(InputError::MissingContent.into()),
    };

    let summary = services.summarizer.summarize(&text).await?;
    info!("📝 摘要完成: {}", truncate_text(&summary, 60));

    Ok(Json(SummaryResponse { summary }))
}

fn upload_dir(state: &AppState) -> Option<&Path> {
    state.config.upload_dir.as_deref().map(Path::new)
}

/// 落盘后按扩展名读取全文，临时文件在返回时删除
async fn read_upload(upload: &Upload, dir: Option<&Path>) -> AppResult<String> {
    let temp = upload.to_temp_file(dir).await?;
    let text = DataSource::file(temp.path()).get_text().await?;

    if text.trim().is_empty() {
        return Err(InputError::EmptyDocument.into());
    }
    Ok(text)
}
