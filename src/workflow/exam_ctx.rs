//! 出题请求上下文
//!
//! 封装"我正在处理哪个请求的哪份文档"这一信息，只用于日志

use std::fmt::Display;

/// 出题请求上下文
#[derive(Debug, Clone)]
pub struct ExamCtx {
    /// 请求序号（进程内递增，仅用于日志显示）
    pub request_no: u64,

    /// 上传的文件名
    pub document: String,
}

impl ExamCtx {
    pub fn new(request_no: u64, document: impl Into<String>) -> Self {
        Self {
            request_no,
            document: document.into(),
        }
    }
}

impl Display for ExamCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[请求#{} 文档 {}]", self.request_no, self.document)
    }
}
