use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 日志文件（为空时只输出到终端）
    pub log_file: Option<String>,
    // --- 出题流程 ---
    /// 每个文本块的近似 token 上限（按 4 字符/token 估算）
    pub chunk_max_tokens: usize,
    /// 每个文档最多处理的文本块数量
    pub max_chunks: usize,
    /// 逐块出题接口最多处理的文本块数量
    pub per_chunk_max_chunks: usize,
    /// 每个文本块抽取的候选答案数量
    pub mcq_candidates_per_chunk: usize,
    /// 每个文本块生成的开放题数量
    pub open_questions_per_chunk: usize,
    /// 每道选择题的干扰项数量
    pub distractor_count: usize,
    /// 抽取干扰项时的候选池大小
    pub distractor_pool_size: usize,
    /// 题目去重的相似度阈值
    pub similarity_threshold: f64,
    /// 请求未指定数量时的默认题目数
    pub default_question_count: usize,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
    /// 上传文件的临时目录（为空时使用系统临时目录）
    pub upload_dir: Option<String>,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub summary_model_name: String,
    // --- 词性标注服务 ---
    /// 外部词性标注服务地址，为空时使用内置词典标注器
    pub tagger_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            verbose_logging: false,
            log_file: None,
            chunk_max_tokens: 400,
            max_chunks: 5,
            per_chunk_max_chunks: 3,
            mcq_candidates_per_chunk: 5,
            open_questions_per_chunk: 2,
            distractor_count: 3,
            distractor_pool_size: 50,
            similarity_threshold: 0.85,
            default_question_count: 10,
            max_upload_bytes: 20 * 1024 * 1024,
            upload_dir: None,
            llm_api_key: String::new(),
            llm_api_base_url: "http://localhost:11434/v1".to_string(),
            llm_model_name: "t5-base-qg-hl".to_string(),
            summary_model_name: "distilbart-cnn-12-6".to_string(),
            tagger_url: None,
        }
    }
}

impl Config {
    /// 从环境变量加载（未设置或解析失败的项使用默认值）
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// 从 TOML 文件加载，缺失的项使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(ConfigError::FileReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置：`EXAM_CONFIG` 指向的 TOML 文件 + 环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let config = match std::env::var("EXAM_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(path.trim())?.overlay_env(),
            _ => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 检查配置值是否合法
    pub fn validate(&self) -> AppResult<()> {
        if self.max_chunks == 0 {
            return Err(AppError::invalid_config("max_chunks", "必须大于 0"));
        }
        if self.per_chunk_max_chunks == 0 {
            return Err(AppError::invalid_config("per_chunk_max_chunks", "必须大于 0"));
        }
        if self.chunk_max_tokens == 0 {
            return Err(AppError::invalid_config("chunk_max_tokens", "必须大于 0"));
        }
        if self.distractor_count == 0 {
            return Err(AppError::invalid_config("distractor_count", "必须大于 0"));
        }
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(AppError::invalid_config(
                "similarity_threshold",
                format!("必须在 (0, 1] 之间，当前为 {}", self.similarity_threshold),
            ));
        }
        Ok(())
    }

    fn overlay_env(self) -> Self {
        let base = self;
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(base.bind_addr),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(base.verbose_logging),
            log_file: std::env::var("LOG_FILE").ok().or(base.log_file),
            chunk_max_tokens: env_parse("CHUNK_MAX_TOKENS").unwrap_or(base.chunk_max_tokens),
            max_chunks: env_parse("MAX_CHUNKS").unwrap_or(base.max_chunks),
            per_chunk_max_chunks: env_parse("PER_CHUNK_MAX_CHUNKS").unwrap_or(base.per_chunk_max_chunks),
            mcq_candidates_per_chunk: env_parse("MCQ_CANDIDATES_PER_CHUNK").unwrap_or(base.mcq_candidates_per_chunk),
            open_questions_per_chunk: env_parse("OPEN_QUESTIONS_PER_CHUNK").unwrap_or(base.open_questions_per_chunk),
            distractor_count: env_parse("DISTRACTOR_COUNT").unwrap_or(base.distractor_count),
            distractor_pool_size: env_parse("DISTRACTOR_POOL_SIZE").unwrap_or(base.distractor_pool_size),
            similarity_threshold: env_parse("SIMILARITY_THRESHOLD").unwrap_or(base.similarity_threshold),
            default_question_count: env_parse("DEFAULT_QUESTION_COUNT").unwrap_or(base.default_question_count),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES").unwrap_or(base.max_upload_bytes),
            upload_dir: std::env::var("UPLOAD_DIR").ok().or(base.upload_dir),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(base.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(base.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(base.llm_model_name),
            summary_model_name: std::env::var("SUMMARY_MODEL_NAME").unwrap_or(base.summary_model_name),
            tagger_url: std::env::var("TAGGER_URL").ok().or(base.tagger_url),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
