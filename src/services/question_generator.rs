//! 题干生成 - 业务能力层
//!
//! 只负责把文本块交给生成模型并整理输出，不关心去重策略和配额

use std::sync::Arc;

use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::TextModel;
use crate::utils::truncate_text;

/// 模型输入上限（512 tokens × 4 字符）
pub const MAX_MODEL_INPUT_CHARS: usize = 2048;

/// 开放题模式的输入前缀
const OPEN_PREFIX: &str = "generate questions: ";

/// 题干生成器
#[derive(Clone)]
pub struct QuestionGenerator {
    model: Arc<dyn TextModel>,
}

impl QuestionGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// 开放题模式：针对文本块生成最多 `num_questions` 道互不相同的题目
    pub async fn generate(&self, chunk: &str, num_questions: usize) -> AppResult<Vec<String>> {
        let input = format!("{}{}", OPEN_PREFIX, chunk);
        self.run_model(&input, num_questions).await
    }

    /// 答案导向模式：生成一道以 `answer` 为正确答案的题目
    ///
    /// 模型没有输出时返回兜底题干 `What is related to {answer}?`
    pub async fn generate_for_answer(&self, answer: &str, chunk: &str) -> AppResult<String> {
        let input = format!("answer: {} context: {}", answer, chunk);
        let questions = self.run_model(&input, 1).await?;

        Ok(questions.into_iter().next().unwrap_or_else(|| {
            debug!("模型没有为答案 '{}' 生成题目，使用兜底题干", answer);
            fallback_question(answer)
        }))
    }

    /// 调用模型并按首次出现顺序去重
    async fn run_model(&self, input: &str, num_questions: usize) -> AppResult<Vec<String>> {
        let input = if input.chars().count() > MAX_MODEL_INPUT_CHARS {
            input.chars().take(MAX_MODEL_INPUT_CHARS).collect::<String>()
        } else {
            input.to_string()
        };
        debug!(
            "生成题目 (模型: {}): {}",
            self.model.name(),
            truncate_text(&input, 60)
        );

        let outputs = self.model.generate(&input, num_questions).await?;

        let mut questions: Vec<String> = Vec::with_capacity(outputs.len());
        for output in outputs {
            let output = output.trim().to_string();
            if !output.is_empty() && !questions.contains(&output) {
                questions.push(output);
            }
        }
        questions.truncate(num_questions);
        Ok(questions)
    }
}

/// 兜底题干
pub fn fallback_question(answer: &str) -> String {
    format!("What is related to {}?", answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mock::ScriptedTextModel;

    #[tokio::test]
    async fn test_open_mode_dedups_in_order() {
        let model = ScriptedTextModel::with_responses([vec![
            "Q2".to_string(),
            "Q1".to_string(),
            "Q2".to_string(),
        ]]);
        let generator = QuestionGenerator::new(Arc::new(model.clone()));

        let questions = generator.generate("Some text.", 3).await.unwrap();
        assert_eq!(questions, vec!["Q2", "Q1"]);
        assert!(model.calls()[0].input.starts_with("generate questions: Some text."));
    }

    #[tokio::test]
    async fn test_answer_mode_input_and_output() {
        let model = ScriptedTextModel::new();
        let generator = QuestionGenerator::new(Arc::new(model.clone()));

        let question = generator
            .generate_for_answer("mat", "The cat sat on the mat.")
            .await
            .unwrap();
        assert_eq!(question, "Fill in the blank: The cat sat on the ____.");
        assert_eq!(model.calls()[0].input, "answer: mat context: The cat sat on the mat.");
        assert_eq!(model.calls()[0].num_return, 1);
    }

    #[tokio::test]
    async fn test_answer_mode_fallback() {
        let generator = QuestionGenerator::new(Arc::new(ScriptedTextModel::empty()));
        let question = generator.generate_for_answer("Paris", "x").await.unwrap();
        assert_eq!(question, "What is related to Paris?");
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let generator = QuestionGenerator::new(Arc::new(ScriptedTextModel::failing("boom")));
        assert!(generator.generate_for_answer("Paris", "x").await.is_err());
        assert!(generator.generate("x", 2).await.is_err());
    }

    #[tokio::test]
    async fn test_long_input_is_truncated() {
        let model = ScriptedTextModel::empty();
        let generator = QuestionGenerator::new(Arc::new(model.clone()));
        let chunk = "a".repeat(10_000);

        generator.generate(&chunk, 2).await.unwrap();
        assert_eq!(model.calls()[0].input.chars().count(), MAX_MODEL_INPUT_CHARS);
    }
}
