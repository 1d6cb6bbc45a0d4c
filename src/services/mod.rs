//! 业务能力层
//!
//! 描述"我能做什么"：分块、抽取候选、选干扰项、生成题干、摘要。
//! 每个能力只处理单个文本块，不关心请求配额和流程顺序。

pub mod candidate_extractor;
pub mod chunker;
pub mod distractor_selector;
pub mod question_generator;
pub mod sampling;
pub mod similarity;
pub mod summarizer;

pub use candidate_extractor::CandidateExtractor;
pub use chunker::chunk_text;
pub use distractor_selector::{DistractorSelector, PLACEHOLDER_OPTION};
pub use question_generator::{fallback_question, QuestionGenerator};
pub use similarity::{is_near_duplicate, similarity_ratio};
pub use summarizer::Summarizer;
