//! 服务共享状态

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::Summarizer;
use crate::workflow::{AssemblyPolicy, ExamCtx, ModelContext, QuestionAssembler};

/// 依赖模型的能力，模型加载失败时整体缺席
pub struct ExamServices {
    pub assembler: QuestionAssembler,
    pub summarizer: Summarizer,
}

impl ExamServices {
    pub fn new(models: &ModelContext, config: &Config) -> Self {
        Self {
            assembler: QuestionAssembler::new(models, AssemblyPolicy::from(config)),
            summarizer: Summarizer::new(models.summary_model.clone()),
        }
    }
}

/// 请求间共享的只读状态
pub struct AppState {
    pub config: Config,
    services: Option<ExamServices>,
    request_counter: AtomicU64,
}

impl AppState {
    pub fn new(config: Config, models: Option<ModelContext>) -> Self {
        let services = models.map(|models| ExamServices::new(&models, &config));
        Self {
            config,
            services,
            request_counter: AtomicU64::new(0),
        }
    }

    /// 模型未加载时返回 [`AppError::ModelUnavailable`]
    pub fn services(&self) -> AppResult<&ExamServices> {
        self.services.as_ref().ok_or(AppError::ModelUnavailable)
    }

    pub fn is_ready(&self) -> bool {
        self.services.is_some()
    }

    /// 为新请求分配上下文
    pub fn next_ctx(&self, document: &str) -> ExamCtx {
        let request_no = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
        ExamCtx::new(request_no, document)
    }
}
