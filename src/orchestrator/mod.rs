//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是 HTTP 入口，负责资源和生命周期，不做出题判断。
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 启动时构建一次 `ModelContext`
//! - 绑定端口、提供服务、优雅退出
//!
//! ### `handlers` / `form` - 请求处理
//! - 解析 multipart 表单、落盘临时文件
//! - 调用 workflow::QuestionAssembler 或 Summarizer
//! - 错误统一映射为 `{"detail": ...}`
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (HTTP 请求)
//!     ↓
//! workflow::QuestionAssembler (处理一份文档)
//!     ↓
//! services (能力层：chunk / extract / distract / generate / summarize)
//!     ↓
//! infrastructure (基础设施：PosTagger / TextModel / DataSource)
//! ```

pub mod app;
pub mod form;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::App;
pub use router::build_router;
pub use state::{AppState, ExamServices};
