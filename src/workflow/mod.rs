//! 流程层
//!
//! 描述"先做什么、后做什么"：把业务能力编排成完整的组卷流程

pub mod assembler;
pub mod exam_ctx;
pub mod model_context;

pub use assembler::{AssemblyPolicy, QuestionAssembler};
pub use exam_ctx::ExamCtx;
pub use model_context::ModelContext;
