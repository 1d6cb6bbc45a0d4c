//! 可脚本化的文本模型，用于测试和离线运行
//!
//! 默认输出由输入文本确定性地推导出来：
//! - `answer: X context: Y` → 用 Y 中包含 X 的句子构造填空题
//! - `generate questions: Y` → 针对 Y 的前几句各构造一道开放题
//! - `summarize: Y` → Y 的前两句
//!
//! ```rust
//! use exam_generator::infrastructure::mock::ScriptedTextModel;
//! use exam_generator::infrastructure::TextModel;
//!
//! # tokio_test::block_on(async {
//! let model = ScriptedTextModel::new();
//! let out = model.generate("answer: cat context: The cat sat on the mat.", 1).await.unwrap();
//! assert_eq!(out, vec!["Fill in the blank: The ____ sat on the mat."]);
//! # });
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::infrastructure::text_model::TextModel;
use crate::infrastructure::tokenizer::split_sentences;

/// 一次模型调用的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub input: String,
    pub num_return: usize,
}

#[derive(Debug, Clone)]
enum Mode {
    Echo,
    Scripted(VecDeque<Vec<String>>),
    Empty,
    Fail(String),
}

/// 可脚本化的文本模型
#[derive(Clone)]
pub struct ScriptedTextModel {
    name: String,
    mode: Arc<Mutex<Mode>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl ScriptedTextModel {
    /// 默认的确定性模型
    pub fn new() -> Self {
        Self::with_mode(Mode::Echo)
    }

    /// 按顺序返回预设的输出，用完后回落到默认行为
    pub fn with_responses(responses: impl IntoIterator<Item = Vec<String>>) -> Self {
        Self::with_mode(Mode::Scripted(responses.into_iter().collect()))
    }

    /// 总是返回空结果
    pub fn empty() -> Self {
        Self::with_mode(Mode::Empty)
    }

    /// 总是调用失败
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_mode(Mode::Fail(message.into()))
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            name: "scripted".to_string(),
            mode: Arc::new(Mutex::new(mode)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 已记录的调用
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next_scripted(&self) -> Option<AppResult<Vec<String>>> {
        let mut mode = self.mode.lock().ok()?;
        match &mut *mode {
            Mode::Echo => None,
            Mode::Scripted(queue) => queue.pop_front().map(Ok),
            Mode::Empty => Some(Ok(Vec::new())),
            Mode::Fail(message) => Some(Err(AppError::model_call_failed(&self.name, message.as_str()))),
        }
    }
}

impl Default for ScriptedTextModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextModel for ScriptedTextModel {
    async fn generate(&self, input: &str, num_return: usize) -> AppResult<Vec<String>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                input: input.to_string(),
                num_return,
            });
        }

        if let Some(result) = self.next_scripted() {
            return result.map(|outputs| outputs.into_iter().take(num_return).collect());
        }

        Ok(echo(input, num_return))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn echo(input: &str, num_return: usize) -> Vec<String> {
    if let Some(rest) = input.strip_prefix("answer: ") {
        let (answer, context) = rest.split_once(" context: ").unwrap_or((rest, ""));
        return split_sentences(context)
            .into_iter()
            .find(|sentence| sentence.contains(answer))
            .map(|sentence| vec![format!("Fill in the blank: {}", sentence.replacen(answer, "____", 1))])
            .unwrap_or_default();
    }

    if let Some(context) = input.strip_prefix("generate questions: ") {
        return split_sentences(context)
            .into_iter()
            .take(num_return)
            .map(|sentence| {
                let statement = sentence.trim_end_matches(['.', '!', '?']);
                format!("Explain in your own words: {}?", statement)
            })
            .collect();
    }

    if let Some(text) = input.strip_prefix("summarize: ") {
        let summary = split_sentences(text).into_iter().take(2).collect::<Vec<_>>().join(" ");
        if !summary.is_empty() {
            return vec![summary];
        }
    }

    Vec::new()
}
