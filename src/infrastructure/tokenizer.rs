//! 分句与分词
//!
//! 基于正则的轻量实现，供词性标注和候选答案抽取使用

use std::sync::LazyLock;

use phf::phf_set;
use regex::Regex;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).unwrap());

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{N}+(?:[.,]\p{N}+)+|[\p{L}\p{N}]+(?:[-'’.][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").unwrap()
});

/// 句点后不断句的缩写（小写、不含句点）
static ABBREVIATIONS: phf::Set<&'static str> = phf_set! {
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e",
    "fig", "no", "vol", "ch", "approx", "inc", "ltd", "co", "jan", "feb", "mar",
    "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
};

/// 分句
///
/// 以句末标点 + 空白作为句子边界，常见缩写（Mr. / e.g. 等）不断句。
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        let before = &text[start..m.start()];
        let last_word = before
            .rsplit(|c: char| c.is_whitespace())
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if m.as_str().starts_with('.') && ABBREVIATIONS.contains(last_word.as_str()) {
            continue;
        }

        let sentence = text[start..m.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// 分词
///
/// 单词（可含内部连字符/撇号）、数字、单个标点各为一个 token；
/// 所有格 `'s` 从词干上拆分为独立 token。
pub fn tokenize_words(sentence: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in WORD.find_iter(sentence) {
        let word = m.as_str();
        let possessive = ["'s", "’s", "'S", "’S"]
            .iter()
            .find(|suffix| word.len() > suffix.len() && word.ends_with(*suffix));
        match possessive {
            Some(suffix) => {
                tokens.push(word[..word.len() - suffix.len()].to_string());
                tokens.push(suffix.to_string());
            }
            None => tokens.push(word.to_string()),
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("The cat sat on the mat. The dog ran in the park.");
        assert_eq!(
            sentences,
            vec!["The cat sat on the mat.", "The dog ran in the park."]
        );
    }

    #[test]
    fn test_split_sentences_keeps_abbreviations() {
        let sentences = split_sentences("Mr. Smith visited Paris! Did he like it?  Yes");
        assert_eq!(
            sentences,
            vec!["Mr. Smith visited Paris!", "Did he like it?", "Yes"]
        );
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_tokenize_words() {
        assert_eq!(
            tokenize_words("The well-known cat's toy, sadly, broke."),
            vec!["The", "well-known", "cat", "'s", "toy", ",", "sadly", ",", "broke", "."]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            tokenize_words("In 1969 it cost 3.5 dollars, or 1,200 cents"),
            vec!["In", "1969", "it", "cost", "3.5", "dollars", ",", "or", "1,200", "cents"]
        );
    }
}
