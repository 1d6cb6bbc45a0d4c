//! # Exam Generator
//!
//! 从上传的文档（纯文本 / PDF）自动生成考试题目的 Rust 服务
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 外部能力的边界，只暴露接口
//! - `PosTagger` - 词性标注（内置词典标注器 / HTTP 标注服务）
//! - `TextModel` - seq2seq 文本生成模型（OpenAI 兼容接口）
//! - `DataSource` - 读取文档全文
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文本块
//! - `chunk_text` - 按段落切块
//! - `CandidateExtractor` / `DistractorSelector` - 候选答案与干扰项
//! - `QuestionGenerator` / `Summarizer` - 题干生成与摘要
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份文档"的完整出题流程
//! - `ModelContext` - 启动时构建一次的模型上下文
//! - `QuestionAssembler` - 分块 → 选择题 → 开放题，配额与查重
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - HTTP 服务（axum），管理生命周期和请求解析
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerForm, Chunk, Difficulty, ExamRequest, QuestionRecord, QuestionType};
pub use orchestrator::{build_router, App, AppState};
pub use workflow::{AssemblyPolicy, ExamCtx, ModelContext, QuestionAssembler};
