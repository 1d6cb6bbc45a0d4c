//! 候选答案抽取 - 业务能力层
//!
//! 从文本块中找出名词类 token 作为候选答案

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::tokenizer::split_sentences;
use crate::infrastructure::PosTagger;
use crate::services::sampling::sample_without_replacement;

/// 候选词的最小长度（字符数，严格大于）
const MIN_CANDIDATE_CHARS: usize = 2;

/// 候选答案抽取器
///
/// 职责：
/// - 分句、调用标注器、筛选名词
/// - 去重后无放回随机抽样
/// - 不关心题目和流程
#[derive(Clone)]
pub struct CandidateExtractor {
    tagger: Arc<dyn PosTagger>,
}

impl CandidateExtractor {
    pub fn new(tagger: Arc<dyn PosTagger>) -> Self {
        Self { tagger }
    }

    /// 抽取最多 `count` 个互不相同的候选答案
    ///
    /// 去重按大小写敏感的精确匹配；超过 `count` 时均匀随机抽样，
    /// 返回顺序不代表重要性。
    pub async fn extract(&self, chunk: &str, count: usize) -> AppResult<Vec<String>> {
        let mut candidates = Vec::new();

        for sentence in split_sentences(chunk) {
            let tagged = self.tagger.tag(sentence).await?;
            candidates.extend(
                tagged
                    .into_iter()
                    .filter(|token| token.is_noun() && token.word.chars().count() > MIN_CANDIDATE_CHARS)
                    .map(|token| token.word),
            );
        }

        // 词频只用于诊断日志，不影响抽样
        let frequencies = count_frequencies(&candidates);
        if let Some((word, freq)) = frequencies.iter().max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0))) {
            debug!(
                "抽取到 {} 个名词（{} 个不同），最高频: {} ×{}",
                candidates.len(),
                frequencies.len(),
                word,
                freq
            );
        }

        let unique: Vec<String> = candidates.into_iter().collect::<HashSet<_>>().into_iter().collect();
        if unique.len() > count {
            return Ok(sample_without_replacement(unique, count));
        }
        Ok(unique)
    }
}

fn count_frequencies(words: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::LexiconTagger;
    use std::collections::BTreeSet;

    fn extractor() -> CandidateExtractor {
        CandidateExtractor::new(Arc::new(LexiconTagger::new()))
    }

    #[tokio::test]
    async fn test_extracts_unique_nouns() {
        let found = extractor()
            .extract("The cat sat on the mat. The cat ran in the park.", 10)
            .await
            .unwrap();
        let found: BTreeSet<String> = found.into_iter().collect();
        let expected: BTreeSet<String> = ["cat", "mat", "park"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_samples_down_to_count() {
        let chunk = "The cat sat on the mat. The dog ran in the park. The bird flew over the house.";
        for _ in 0..10 {
            let found = extractor().extract(chunk, 2).await.unwrap();
            assert_eq!(found.len(), 2);
            assert_ne!(found[0], found[1]);
        }
    }

    #[tokio::test]
    async fn test_short_tokens_are_dropped() {
        let found = extractor().extract("An ox is big.", 5).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_case_sensitive_uniqueness() {
        let found = extractor()
            .extract("Rivers flood. Many rivers flood.", 10)
            .await
            .unwrap();
        let found: BTreeSet<String> = found.into_iter().collect();
        assert!(found.contains("Rivers"));
        assert!(found.contains("rivers"));
    }

    #[tokio::test]
    async fn test_empty_chunk() {
        assert!(extractor().extract("", 5).await.unwrap().is_empty());
    }
}
