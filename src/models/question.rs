use serde::{Deserialize, Serialize};

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 选择题
    Mcq,
    /// 简答题
    Short,
    /// 论述题
    Long,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Short => "short",
            QuestionType::Long => "long",
        }
    }

    /// 是否为开放题（简答/论述）
    pub fn is_open(self) -> bool {
        matches!(self, QuestionType::Short | QuestionType::Long)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一道生成好的题目
///
/// 创建后不再修改；`id` 在单次请求内从 1 开始递增。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// 正确选项在 `options` 中的下标（选择题，下标形式）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<usize>,
    /// 正确答案文本（选择题，取值形式）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// 出题所依据的文本块
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl QuestionRecord {
    /// 创建开放题
    pub fn open(id: usize, kind: QuestionType, question: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            question: question.into(),
            options: None,
            correct: None,
            answer: None,
            context: None,
        }
    }

    /// 附带出题依据的文本块
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// 正确选项的文本（选择题）
    pub fn correct_option(&self) -> Option<&str> {
        let options = self.options.as_ref()?;
        match (self.correct, &self.answer) {
            (Some(index), _) => options.get(index).map(String::as_str),
            (None, Some(answer)) => options.iter().find(|o| *o == answer).map(String::as_str),
            (None, None) => None,
        }
    }
}

/// 逐块出题接口的题型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkQuestionKind {
    Mcq,
    Qa,
}

/// 逐块出题接口返回的一道题
///
/// 与 [`QuestionRecord`] 不同：没有编号，总是附带文本块，选择题给出答案文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkQuestion {
    #[serde(rename = "type")]
    pub kind: ChunkQuestionKind,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub context: String,
}
