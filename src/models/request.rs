use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::QuestionType;

/// 难度（接受但不参与出题逻辑）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Mixed,
}

impl Difficulty {
    /// 宽松解析：无法识别的取值回落到默认难度
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "mixed" => Ok(Difficulty::Mixed),
            _ => Err(AppError::invalid_field("difficulty", s)),
        }
    }
}

/// 选择题正确答案的表示方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerForm {
    /// `correct`: 打乱后的选项下标
    #[default]
    Index,
    /// `answer`: 正确答案文本
    Value,
}

impl FromStr for AnswerForm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "index" | "" => Ok(AnswerForm::Index),
            "value" | "answer" => Ok(AnswerForm::Value),
            _ => Err(AppError::invalid_field("answer_form", s)),
        }
    }
}

/// 一次出题请求
#[derive(Debug, Clone)]
pub struct ExamRequest {
    /// 需要的题目总数
    pub count: usize,
    /// 需要的题型，为空时等同于只要选择题
    pub types: BTreeSet<QuestionType>,
    pub difficulty: Difficulty,
    pub answer_form: AnswerForm,
    /// 是否在每道题中附带出题依据的文本块
    pub include_context: bool,
}

impl ExamRequest {
    pub fn new(count: usize, types: impl IntoIterator<Item = QuestionType>) -> Self {
        let mut types: BTreeSet<QuestionType> = types.into_iter().collect();
        if types.is_empty() {
            types.insert(QuestionType::Mcq);
        }
        Self {
            count,
            types,
            difficulty: Difficulty::default(),
            answer_form: AnswerForm::default(),
            include_context: false,
        }
    }

    pub fn with_answer_form(mut self, answer_form: AnswerForm) -> Self {
        self.answer_form = answer_form;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_context(mut self, include_context: bool) -> Self {
        self.include_context = include_context;
        self
    }

    pub fn wants(&self, kind: QuestionType) -> bool {
        self.types.contains(&kind)
    }

    pub fn wants_open(&self) -> bool {
        self.wants(QuestionType::Short) || self.wants(QuestionType::Long)
    }

    /// 用于日志显示的题型列表，例如 `mcq+short`
    pub fn types_label(&self) -> String {
        self.types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// 逐块出题模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Mcq,
    Qa,
}

impl FromStr for GenerationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" | "" => Ok(GenerationMode::Mcq),
            "qa" => Ok(GenerationMode::Qa),
            _ => Err(AppError::invalid_field("mode", s)),
        }
    }
}

/// 逐块出题请求：每个文本块各自生成 `num_questions` 道题，不设总配额
#[derive(Debug, Clone, Copy)]
pub struct ChunkRequest {
    pub num_questions: usize,
    pub mode: GenerationMode,
}

impl ChunkRequest {
    pub fn new(num_questions: usize, mode: GenerationMode) -> Self {
        Self {
            num_questions,
            mode,
        }
    }
}

/// 解析表单中的布尔字段（只有 "true" 不区分大小写时为真）
pub fn parse_form_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
