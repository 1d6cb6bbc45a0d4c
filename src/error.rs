use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入错误（空文件、无法读取、表单字段非法）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 模型尚未加载
    #[error("模型尚未加载，服务暂不可用")]
    ModelUnavailable,
    /// 生成流程中的模型/标注器错误
    #[error("生成失败: {0}")]
    Generation(#[from] GenerationError),
    /// 数据源错误
    #[error("数据源错误: {0}")]
    Source(#[from] SourceError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 输入错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 文件为空或无法提取文本
    #[error("文件为空或无法提取文本")]
    EmptyDocument,
    /// 请求中缺少上传文件
    #[error("缺少上传文件")]
    MissingFile,
    /// 既没有文件也没有文本
    #[error("未提供内容（需要文件或文本）")]
    MissingContent,
    /// 表单字段解析失败
    #[error("字段 {field} 的值 '{value}' 非法")]
    InvalidField { field: String, value: String },
    /// multipart 解析失败
    #[error("上传内容解析失败: {0}")]
    Multipart(String),
}

/// 生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 模型调用失败
    #[error("模型调用失败 (模型: {model}): {message}")]
    ModelCallFailed { model: String, message: String },
    /// 词性标注失败
    #[error("词性标注失败: {message}")]
    TaggingFailed { message: String },
    /// 请求构建失败
    #[error("请求构建失败: {0}")]
    RequestBuild(String),
}

/// 数据源错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取失败
    #[error("读取失败 ({path}): {message}")]
    ReadFailed { path: String, message: String },
    /// 尚未实现的数据源
    #[error("数据源尚未实现: {kind}")]
    Unsupported { kind: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {message}")]
    FileReadFailed { path: String, message: String },
    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(String),
    /// 配置值非法
    #[error("配置项 {key} 非法: {reason}")]
    InvalidValue { key: String, reason: String },
}

// ========== 从常见错误类型转换 ==========

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(ConfigError::TomlParseFailed(err.to_string()))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建模型调用错误
    pub fn model_call_failed(model: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AppError::Generation(GenerationError::ModelCallFailed {
            model: model.into(),
            message: source.to_string(),
        })
    }

    /// 创建词性标注错误
    pub fn tagging_failed(source: impl std::fmt::Display) -> Self {
        AppError::Generation(GenerationError::TaggingFailed {
            message: source.to_string(),
        })
    }

    /// 创建字段非法错误
    pub fn invalid_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        AppError::Input(InputError::InvalidField {
            field: field.into(),
            value: value.into(),
        })
    }

    /// 创建配置值非法错误
    pub fn invalid_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        })
    }

    /// 是否属于调用方的输入问题（对应 4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Input(_)
                | AppError::Source(SourceError::NotFound { .. })
                | AppError::Source(SourceError::ReadFailed { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::Input(InputError::EmptyDocument).is_client_error());
        assert!(AppError::Source(SourceError::NotFound {
            path: "a.txt".to_string()
        })
        .is_client_error());
        assert!(!AppError::ModelUnavailable.is_client_error());
        assert!(!AppError::model_call_failed("t5", "boom").is_client_error());
        assert!(!AppError::Source(SourceError::Unsupported {
            kind: "database".to_string()
        })
        .is_client_error());
    }

    #[test]
    fn test_generation_error_keeps_original_message() {
        let err = AppError::model_call_failed("qg-model", "CUDA out of memory");
        assert!(err.to_string().contains("CUDA out of memory"));
        assert!(err.to_string().contains("qg-model"));
    }
}
