//! 词性标注 - 基础设施层
//!
//! 标注器是外部黑盒：输入一个句子，返回带 Penn Treebank 词性的 token 列表

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// 名词类词性：单数、复数、专有单数、专有复数
pub const NOUN_TAGS: [&str; 4] = ["NN", "NNS", "NNP", "NNPS"];

/// 带词性的 token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }

    /// 是否为名词
    pub fn is_noun(&self) -> bool {
        NOUN_TAGS.contains(&self.tag.as_str())
    }
}

/// 词性标注器
#[async_trait]
pub trait PosTagger: Send + Sync {
    /// 对单个句子分词并标注
    async fn tag(&self, sentence: &str) -> AppResult<Vec<TaggedToken>>;

    /// 标注器名称（用于日志）
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_tags() {
        assert!(TaggedToken::new("cat", "NN").is_noun());
        assert!(TaggedToken::new("cats", "NNS").is_noun());
        assert!(TaggedToken::new("Paris", "NNP").is_noun());
        assert!(TaggedToken::new("Alps", "NNPS").is_noun());
        assert!(!TaggedToken::new("ran", "VBD").is_noun());
        assert!(!TaggedToken::new("the", "DT").is_noun());
    }
}
