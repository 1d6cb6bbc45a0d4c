//! 文本数据源
//!
//! 只暴露"取出全文"这一个能力；文件源支持纯文本与 PDF

use std::path::PathBuf;

use tracing::debug;

use crate::error::SourceError;

/// 数据源
#[derive(Debug, Clone)]
pub enum DataSource {
    /// 本地文件（纯文本或 PDF）
    File(FileSource),
    /// 数据库（尚未实现）
    Database(DatabaseSource),
}

impl DataSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DataSource::File(FileSource::new(path))
    }

    /// 读取全部文本
    pub async fn get_text(&self) -> Result<String, SourceError> {
        match self {
            DataSource::File(source) => source.get_text().await,
            DataSource::Database(source) => source.get_text().await,
        }
    }
}

/// 文件数据源
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_pdf(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }

    pub async fn get_text(&self) -> Result<String, SourceError> {
        let path_str = self.path.display().to_string();
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(SourceError::NotFound { path: path_str });
        }

        if self.is_pdf() {
            debug!("按 PDF 解析: {}", path_str);
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|e| read_failed(&path_str, e))?;
            // pdf-extract 是同步且 CPU 密集的
            return tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|e| read_failed(&path_str, e))?
                .map_err(|e| read_failed(&path_str, e));
        }

        debug!("按纯文本读取: {}", path_str);
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| read_failed(&path_str, e))
    }
}

/// 数据库数据源（占位）
#[derive(Debug, Clone)]
pub struct DatabaseSource {
    pub connection_string: String,
}

impl DatabaseSource {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
        }
    }

    pub async fn get_text(&self) -> Result<String, SourceError> {
        Err(SourceError::Unsupported {
            kind: "database".to_string(),
        })
    }
}

/// 提取 PDF 文本，页与页之间用换行分隔
fn extract_pdf_text(bytes: &[u8]) -> Result<String, String> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())?;
    // pdf-extract 用换页符分隔页面
    Ok(text
        .split('\x0C')
        .map(str::trim_end)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn read_failed(path: &str, e: impl std::fmt::Display) -> SourceError {
    SourceError::ReadFailed {
        path: path.to_string(),
        message: e.to_string(),
    }
}
