//! 摘要服务 - 业务能力层

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{AppResult, InputError};
use crate::infrastructure::TextModel;

/// 送入摘要模型的最大字符数
pub const MAX_SUMMARY_INPUT_CHARS: usize = 4000;

/// 摘要失败时返回的文本
pub const SUMMARY_FAILED: &str = "Failed to generate summary.";

/// 摘要服务
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn TextModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// 生成摘要
    ///
    /// 只取前 [`MAX_SUMMARY_INPUT_CHARS`] 个字符；模型出错或没有输出时
    /// 记录日志并返回 [`SUMMARY_FAILED`]，不向调用方报错。
    pub async fn summarize(&self, text: &str) -> AppResult<String> {
        if text.trim().is_empty() {
            return Err(InputError::EmptyDocument.into());
        }

        let truncated: String = text.chars().take(MAX_SUMMARY_INPUT_CHARS).collect();
        let input = format!("summarize: {}", truncated.trim());
        debug!("生成摘要 (模型: {}), 输入 {} 字符", self.model.name(), truncated.chars().count());

        match self.model.generate(&input, 1).await {
            Ok(outputs) => match outputs.into_iter().find(|s| !s.trim().is_empty()) {
                Some(summary) => Ok(summary.trim().to_string()),
                None => {
                    warn!("摘要模型没有输出");
                    Ok(SUMMARY_FAILED.to_string())
                }
            },
            Err(e) => {
                warn!("摘要生成失败: {}", e);
                Ok(SUMMARY_FAILED.to_string())
            }
        }
    }
}
