//! multipart 表单解析

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{AppError, AppResult, InputError};
use crate::models::{
    parse_form_bool, AnswerForm, ChunkRequest, Difficulty, ExamRequest, GenerationMode,
    QuestionType,
};

/// 临时文件名前缀
pub const UPLOAD_PREFIX: &str = "upload-";

const DEFAULT_QUESTIONS_PER_CHUNK: usize = 5;

/// 上传的文件
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Upload {
    /// 写入临时文件，保留原扩展名以便按类型解析
    ///
    /// `dir` 为空时使用系统临时目录；返回的临时文件在 drop 时删除
    pub async fn to_temp_file(&self, dir: Option<&Path>) -> AppResult<NamedTempFile> {
        let suffix = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let bytes = self.bytes.clone();
        let dir: Option<PathBuf> = dir.map(Path::to_path_buf);

        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut builder = tempfile::Builder::new();
            builder.prefix(UPLOAD_PREFIX).suffix(&suffix);
            let mut file = match &dir {
                Some(dir) => builder.tempfile_in(dir)?,
                None => builder.tempfile()?,
            };
            file.write_all(&bytes)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(temp_file_error)?
        .map_err(temp_file_error)?;

        debug!(
            "上传文件 {} ({} 字节) 写入 {}",
            self.file_name,
            self.bytes.len(),
            file.path().display()
        );
        Ok(file)
    }
}

/// 解析后的表单：至多一个文件加若干文本字段
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Upload>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.file = Some(Upload { file_name, bytes });
            } else {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn count_field(&self, name: &str, default: usize) -> AppResult<usize> {
        match self.field(name).map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<usize>()
                .map_err(|_| AppError::invalid_field(name, raw)),
            _ => Ok(default),
        }
    }

    fn flag(&self, name: &str, default: bool) -> bool {
        self.field(name).map(parse_form_bool).unwrap_or(default)
    }

    /// 按出题表单的约定构造请求
    ///
    /// `mcq` 默认开启，`short`/`long` 默认关闭
    pub fn exam_request(&self, default_count: usize) -> AppResult<ExamRequest> {
        let count = self.count_field("count", default_count)?;

        let types = [
            (QuestionType::Mcq, self.flag("mcq", true)),
            (QuestionType::Short, self.flag("short", false)),
            (QuestionType::Long, self.flag("long", false)),
        ]
        .into_iter()
        .filter_map(|(kind, wanted)| wanted.then_some(kind));

        let difficulty = self
            .field("difficulty")
            .map(Difficulty::parse_lenient)
            .unwrap_or_default();
        let answer_form = self
            .field("answer_form")
            .map(str::parse::<AnswerForm>)
            .transpose()?
            .unwrap_or_default();

        Ok(ExamRequest::new(count, types)
            .with_difficulty(difficulty)
            .with_answer_form(answer_form)
            .with_context(self.flag("include_context", false)))
    }

    /// 按逐块出题表单的约定构造请求：`num_questions` 默认 5，`mode` 默认 mcq
    pub fn chunk_request(&self) -> AppResult<ChunkRequest> {
        let num_questions = self.count_field("num_questions", DEFAULT_QUESTIONS_PER_CHUNK)?;
        let mode = self
            .field("mode")
            .map(str::parse::<GenerationMode>)
            .transpose()?
            .unwrap_or_default();
        Ok(ChunkRequest::new(num_questions, mode))
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    InputError::Multipart(e.to_string()).into()
}

fn temp_file_error(e: impl std::fmt::Display) -> AppError {
    AppError::Other(format!("无法写入临时文件: {}", e))
}
