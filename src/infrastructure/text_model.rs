//! 文本生成模型 - 基础设施层
//!
//! 预训练 seq2seq 模型在这里是黑盒：输入一段文本，返回若干段文本。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 调用兼容 OpenAI API 的推理服务
//! - 出题模型和摘要模型共用同一实现，只是模型名和系统提示不同

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, GenerationError};

/// 文本生成模型
#[async_trait]
pub trait TextModel: Send + Sync {
    /// 生成最多 `num_return` 条输出（可能更少）
    async fn generate(&self, input: &str, num_return: usize) -> AppResult<Vec<String>>;

    /// 模型名称（用于日志和错误信息）
    fn name(&self) -> &str;
}

/// 出题模型的系统提示
pub const QUESTION_SYSTEM_PROMPT: &str = "You are a question generation model. \
When the input starts with \"generate questions:\", write one exam question about the text that follows. \
When the input has the form \"answer: <answer> context: <text>\", write one question about the text whose correct answer is <answer>. \
Reply with the question only, on a single line, without numbering or explanation.";

/// 摘要模型的系统提示
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a summarization model. \
Summarize the given text in plain prose. Keep the summary between 30 and 130 words. \
Reply with the summary only.";

/// 基于 OpenAI 兼容接口的文本模型
pub struct OpenAiTextModel {
    client: Client<OpenAIConfig>,
    model_name: String,
    system_prompt: String,
    max_tokens: u32,
}

impl OpenAiTextModel {
    /// 创建出题模型
    pub fn question_model(config: &Config) -> Self {
        Self::new(config, &config.llm_model_name, QUESTION_SYSTEM_PROMPT, 64)
    }

    /// 创建摘要模型
    pub fn summary_model(config: &Config) -> Self {
        Self::new(config, &config.summary_model_name, SUMMARY_SYSTEM_PROMPT, 256)
    }

    pub fn new(
        config: &Config,
        model_name: impl Into<String>,
        system_prompt: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: model_name.into(),
            system_prompt: system_prompt.into(),
            max_tokens,
        }
    }

    fn build_error(e: impl std::fmt::Display) -> AppError {
        AppError::Generation(GenerationError::RequestBuild(e.to_string()))
    }
}

#[async_trait]
impl TextModel for OpenAiTextModel {
    async fn generate(&self, input: &str, num_return: usize) -> AppResult<Vec<String>> {
        if num_return == 0 {
            return Ok(Vec::new());
        }
        debug!(
            "调用模型 {}，输入长度: {} 字符，返回数: {}",
            self.model_name,
            input.len(),
            num_return
        );

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(self.system_prompt.as_str())
            .build()
            .map_err(Self::build_error)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(input)
            .build()
            .map_err(Self::build_error)?;

        let messages = vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ];

        // 采样解码，与 top-p 采样的 seq2seq 生成保持一致
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .n(num_return.min(u8::MAX as usize) as u8)
            .top_p(0.95)
            .max_completion_tokens(self.max_tokens)
            .build()
            .map_err(Self::build_error)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("模型 {} 调用失败: {}", self.model_name, e);
            AppError::model_call_failed(&self.model_name, e)
        })?;

        let outputs: Vec<String> = response
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .collect();

        debug!("模型 {} 返回 {} 条结果", self.model_name, outputs.len());
        Ok(outputs)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
