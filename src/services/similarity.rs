//! 文本相似度
//!
//! 基于最长公共子序列的匹配比：`2 * M / T`，M 为匹配字符数，T 为两串字符总数

use similar::TextDiff;

/// 两个字符串的相似度，取值 [0, 1]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    TextDiff::from_chars(a, b).ratio() as f64
}

/// `candidate` 是否与任意已接受的题目过于相似（严格大于阈值）
pub fn is_near_duplicate<'a>(
    candidate: &str,
    accepted: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> bool {
    accepted
        .into_iter()
        .any(|existing| similarity_ratio(candidate, existing) > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_disjoint() {
        assert!((similarity_ratio("What is a cat?", "What is a cat?") - 1.0).abs() < 1e-6);
        assert!(similarity_ratio("abc", "xyz") < 1e-6);
        assert!((similarity_ratio("", "") - 1.0).abs() < 1e-6);
        assert!(similarity_ratio("", "abc") < 1e-6);
    }

    #[test]
    fn test_ratio_matches_lcs_definition() {
        // LCS("abcd", "bcde") = 3, T = 8
        assert!((similarity_ratio("abcd", "bcde") - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_near_duplicate_threshold() {
        let accepted = ["What is the capital of France?", "Who wrote Hamlet?"];
        assert!(is_near_duplicate(
            "What is the capital of France ?",
            accepted.iter().copied(),
            0.85
        ));
        assert!(!is_near_duplicate(
            "Why did the dog run in the park?",
            accepted.iter().copied(),
            0.85
        ));
        assert!(!is_near_duplicate("anything", std::iter::empty(), 0.85));
    }
}
