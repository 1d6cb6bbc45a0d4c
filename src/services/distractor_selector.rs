//! 干扰项选择 - 业务能力层
//!
//! 从同一文本块的候选池中挑出"看起来合理但错误"的选项

use tracing::debug;

use crate::error::AppResult;
use crate::services::candidate_extractor::CandidateExtractor;
use crate::services::sampling::sample_without_replacement;

/// 候选池不足时的占位选项
pub const PLACEHOLDER_OPTION: &str = "None of the above";

/// 干扰项选择器
#[derive(Clone)]
pub struct DistractorSelector {
    extractor: CandidateExtractor,
    pool_size: usize,
}

impl DistractorSelector {
    pub fn new(extractor: CandidateExtractor, pool_size: usize) -> Self {
        Self {
            extractor,
            pool_size,
        }
    }

    /// 为 `answer` 选出恰好 `count` 个干扰项
    ///
    /// 与答案相同或包含答案的候选（忽略大小写）会被排除；
    /// 剩余候选不足时用 [`PLACEHOLDER_OPTION`] 补齐。
    pub async fn distractors(&self, answer: &str, chunk: &str, count: usize) -> AppResult<Vec<String>> {
        let pool = self.extractor.extract(chunk, self.pool_size).await?;
        let answer_lower = answer.to_lowercase();

        let mut options: Vec<String> = pool
            .into_iter()
            .filter(|candidate| {
                let candidate_lower = candidate.to_lowercase();
                candidate_lower != answer_lower && !candidate_lower.contains(&answer_lower)
            })
            .collect();

        if options.len() < count {
            debug!(
                "答案 '{}' 的干扰项只有 {} 个，使用占位选项补齐到 {}",
                answer,
                options.len(),
                count
            );
            options.resize(count, PLACEHOLDER_OPTION.to_string());
            return Ok(options);
        }

        Ok(sample_without_replacement(options, count))
    }
}
