//! 模型上下文
//!
//! 进程启动时构建一次，之后以 `Arc` 在请求间只读共享。
//! 标注器和生成模型都在这里显式注入，流程层不持有全局状态。

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{HttpTagger, LexiconTagger, OpenAiTextModel, PosTagger, TextModel};

/// 模型上下文
#[derive(Clone)]
pub struct ModelContext {
    pub tagger: Arc<dyn PosTagger>,
    pub question_model: Arc<dyn TextModel>,
    pub summary_model: Arc<dyn TextModel>,
}

impl ModelContext {
    pub fn new(
        tagger: Arc<dyn PosTagger>,
        question_model: Arc<dyn TextModel>,
        summary_model: Arc<dyn TextModel>,
    ) -> Self {
        Self {
            tagger,
            question_model,
            summary_model,
        }
    }

    /// 按配置构建：有标注服务地址时用 HTTP 标注器，否则用内置词典标注器
    pub fn from_config(config: &Config) -> AppResult<Self> {
        if config.llm_api_base_url.trim().is_empty() {
            return Err(AppError::invalid_config("llm_api_base_url", "不能为空"));
        }
        if config.llm_model_name.trim().is_empty() {
            return Err(AppError::invalid_config("llm_model_name", "不能为空"));
        }

        let tagger: Arc<dyn PosTagger> = match &config.tagger_url {
            Some(url) if !url.trim().is_empty() => Arc::new(HttpTagger::new(url.trim())),
            _ => Arc::new(LexiconTagger::new()),
        };
        info!("✓ 词性标注器: {}", tagger.name());

        let question_model: Arc<dyn TextModel> = Arc::new(OpenAiTextModel::question_model(config));
        let summary_model: Arc<dyn TextModel> = Arc::new(OpenAiTextModel::summary_model(config));
        info!(
            "✓ 模型已就绪: 出题 {} / 摘要 {}",
            question_model.name(),
            summary_model.name()
        );

        Ok(Self::new(tagger, question_model, summary_model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_lexicon_tagger_by_default() {
        let context = ModelContext::from_config(&Config::default()).unwrap();
        assert_eq!(context.tagger.name(), "lexicon");
        assert_eq!(context.question_model.name(), Config::default().llm_model_name);
    }

    #[test]
    fn test_from_config_uses_http_tagger_when_configured() {
        let config = Config {
            tagger_url: Some("http://tagger.local/tag".to_string()),
            ..Config::default()
        };
        let context = ModelContext::from_config(&config).unwrap();
        assert_eq!(context.tagger.name(), "http://tagger.local/tag");
    }

    #[test]
    fn test_from_config_rejects_missing_endpoint() {
        let config = Config {
            llm_api_base_url: " ".to_string(),
            ..Config::default()
        };
        assert!(ModelContext::from_config(&config).is_err());
    }
}
