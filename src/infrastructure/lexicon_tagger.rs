//! 内置词典标注器
//!
//! 无需外部服务的确定性标注器：封闭词类查词典，开放词类靠后缀、大小写和上下文规则，
//! 兜底为名词。只追求把名词和非名词分开，不追求完整的 Penn 词性精度。

use async_trait::async_trait;
use phf::{phf_map, phf_set};

use crate::error::AppResult;
use crate::infrastructure::tagger::{PosTagger, TaggedToken};
use crate::infrastructure::tokenizer::tokenize_words;

/// 封闭词类（小写）→ 词性
static CLOSED_CLASS: phf::Map<&'static str, &'static str> = phf_map! {
    // 限定词
    "the" => "DT", "a" => "DT", "an" => "DT", "this" => "DT", "that" => "DT",
    "these" => "DT", "those" => "DT", "each" => "DT", "every" => "DT", "some" => "DT",
    "any" => "DT", "no" => "DT", "another" => "DT", "all" => "DT", "both" => "DT",
    "either" => "DT", "neither" => "DT",
    // 介词 / 从属连词
    "in" => "IN", "on" => "IN", "at" => "IN", "by" => "IN", "for" => "IN",
    "with" => "IN", "about" => "IN", "against" => "IN", "between" => "IN",
    "into" => "IN", "through" => "IN", "during" => "IN", "before" => "IN",
    "after" => "IN", "above" => "IN", "below" => "IN", "from" => "IN", "of" => "IN",
    "off" => "IN", "over" => "IN", "under" => "IN", "near" => "IN", "since" => "IN",
    "until" => "IN", "within" => "IN", "without" => "IN", "across" => "IN",
    "along" => "IN", "among" => "IN", "around" => "IN", "behind" => "IN",
    "beside" => "IN", "beyond" => "IN", "despite" => "IN", "inside" => "IN",
    "outside" => "IN", "toward" => "IN", "towards" => "IN", "upon" => "IN",
    "like" => "IN", "than" => "IN", "because" => "IN", "although" => "IN",
    "though" => "IN", "while" => "IN", "whereas" => "IN", "if" => "IN",
    "unless" => "IN", "whether" => "IN", "as" => "IN", "per" => "IN", "via" => "IN",
    "to" => "TO",
    // 并列连词
    "and" => "CC", "or" => "CC", "but" => "CC", "nor" => "CC", "yet" => "CC",
    // 代词
    "i" => "PRP", "you" => "PRP", "he" => "PRP", "she" => "PRP", "it" => "PRP",
    "we" => "PRP", "they" => "PRP", "me" => "PRP", "him" => "PRP", "her" => "PRP",
    "us" => "PRP", "them" => "PRP", "itself" => "PRP", "himself" => "PRP",
    "herself" => "PRP", "themselves" => "PRP", "ourselves" => "PRP",
    "myself" => "PRP", "yourself" => "PRP", "one" => "CD",
    "my" => "PRP$", "your" => "PRP$", "his" => "PRP$", "its" => "PRP$",
    "our" => "PRP$", "their" => "PRP$",
    // 疑问词
    "who" => "WP", "whom" => "WP", "whose" => "WP$", "which" => "WDT", "what" => "WP",
    "when" => "WRB", "where" => "WRB", "why" => "WRB", "how" => "WRB",
    // 情态动词
    "can" => "MD", "could" => "MD", "may" => "MD", "might" => "MD", "must" => "MD",
    "shall" => "MD", "should" => "MD", "will" => "MD", "would" => "MD",
    // 助动词与常见不规则动词
    "is" => "VBZ", "are" => "VBP", "am" => "VBP", "was" => "VBD", "were" => "VBD",
    "be" => "VB", "been" => "VBN", "being" => "VBG", "has" => "VBZ", "have" => "VBP",
    "had" => "VBD", "do" => "VBP", "does" => "VBZ", "did" => "VBD", "done" => "VBN",
    "sat" => "VBD", "ran" => "VBD", "went" => "VBD", "came" => "VBD", "saw" => "VBD",
    "made" => "VBD", "took" => "VBD", "gave" => "VBD", "got" => "VBD", "said" => "VBD",
    "found" => "VBD", "knew" => "VBD", "thought" => "VBD", "told" => "VBD",
    "became" => "VBD", "felt" => "VBD", "brought" => "VBD", "began" => "VBD",
    "kept" => "VBD", "held" => "VBD", "wrote" => "VBD", "stood" => "VBD",
    "heard" => "VBD", "meant" => "VBD", "met" => "VBD", "paid" => "VBD",
    "ate" => "VBD", "drew" => "VBD", "grew" => "VBD", "threw" => "VBD", "flew" => "VBD",
    "fell" => "VBD", "led" => "VBD", "lost" => "VBD", "built" => "VBD", "sent" => "VBD",
    "spent" => "VBD", "won" => "VBD", "sold" => "VBD", "taught" => "VBD",
    "caught" => "VBD", "bought" => "VBD", "fought" => "VBD", "rose" => "VBD",
    "drove" => "VBD", "spoke" => "VBD", "broke" => "VBD", "chose" => "VBD",
    "wore" => "VBD", "sang" => "VBD", "swam" => "VBD", "drank" => "VBD",
    "shook" => "VBD", "forgot" => "VBD", "understood" => "VBD", "hid" => "VBD",
    "known" => "VBN", "given" => "VBN", "taken" => "VBN", "written" => "VBN",
    "seen" => "VBN", "gone" => "VBN", "begun" => "VBN", "chosen" => "VBN",
    "spoken" => "VBN", "broken" => "VBN", "eaten" => "VBN", "grown" => "VBN",
    "become" => "VB", "make" => "VB", "take" => "VB", "give" => "VB", "get" => "VB",
    "go" => "VB", "see" => "VB", "know" => "VB", "say" => "VB", "think" => "VB",
    "makes" => "VBZ", "takes" => "VBZ", "gives" => "VBZ", "gets" => "VBZ",
    "goes" => "VBZ", "sees" => "VBZ", "knows" => "VBZ", "says" => "VBZ",
    "becomes" => "VBZ", "contains" => "VBZ", "includes" => "VBZ", "produces" => "VBZ",
    // 副词
    "not" => "RB", "very" => "RB", "also" => "RB", "often" => "RB",
    "always" => "RB", "never" => "RB", "sometimes" => "RB", "usually" => "RB",
    "just" => "RB", "only" => "RB", "even" => "RB", "still" => "RB",
    "already" => "RB", "again" => "RB", "here" => "RB", "there" => "EX",
    "now" => "RB", "then" => "RB", "soon" => "RB", "too" => "RB", "quite" => "RB",
    "rather" => "RB", "almost" => "RB", "perhaps" => "RB", "however" => "RB",
    "therefore" => "RB", "thus" => "RB", "together" => "RB", "away" => "RB",
    "ever" => "RB", "so" => "RB", "out" => "RP", "up" => "RP", "down" => "RP",
    // 常见形容词
    "big" => "JJ", "small" => "JJ", "large" => "JJ", "little" => "JJ", "good" => "JJ",
    "bad" => "JJ", "new" => "JJ", "old" => "JJ", "great" => "JJ", "high" => "JJ",
    "low" => "JJ", "long" => "JJ", "short" => "JJ", "young" => "JJ", "early" => "JJ",
    "late" => "JJ", "important" => "JJ", "different" => "JJ", "same" => "JJ",
    "other" => "JJ", "many" => "JJ", "much" => "JJ", "few" => "JJ", "several" => "JJ",
    "more" => "JJR", "most" => "JJS", "less" => "JJR", "first" => "JJ", "last" => "JJ",
    "next" => "JJ", "own" => "JJ", "main" => "JJ", "major" => "JJ", "common" => "JJ",
    "red" => "JJ", "blue" => "JJ", "green" => "JJ", "black" => "JJ", "white" => "JJ",
    "hot" => "JJ", "cold" => "JJ", "warm" => "JJ", "happy" => "JJ", "sad" => "JJ",
    "true" => "JJ", "false" => "JJ", "free" => "JJ", "full" => "JJ", "whole" => "JJ",
    "real" => "JJ", "best" => "JJS", "better" => "JJR", "worse" => "JJR",
    "worst" => "JJS", "strong" => "JJ", "weak" => "JJ", "easy" => "JJ", "hard" => "JJ",
    "simple" => "JJ", "public" => "JJ", "local" => "JJ", "national" => "JJ",
    "human" => "JJ", "natural" => "JJ", "social" => "JJ", "political" => "JJ",
    "economic" => "JJ", "modern" => "JJ", "ancient" => "JJ", "such" => "JJ",
};

/// 形容词后缀
static ADJECTIVE_SUFFIXES: [&str; 8] = ["ous", "ful", "ive", "less", "able", "ible", "ical", "ish"];

/// 以 s 结尾但通常不是复数的词尾
static NON_PLURAL_ENDINGS: phf::Set<&'static str> = phf_set! { "ss", "us", "is", "ys", "os" };

/// 内置词典标注器
#[derive(Debug, Default, Clone)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    /// 同步标注（供测试和离线场景直接使用）
    pub fn tag_tokens(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(tokens.len());

        for (i, word) in tokens.iter().enumerate() {
            let prev = tagged.last().map(|t| t.tag.as_str());
            let next = tokens.get(i + 1).map(String::as_str);
            let tag = tag_word(word, i == 0, prev, next);
            tagged.push(TaggedToken::new(word.clone(), tag));
        }
        tagged
    }
}

#[async_trait]
impl PosTagger for LexiconTagger {
    async fn tag(&self, sentence: &str) -> AppResult<Vec<TaggedToken>> {
        Ok(self.tag_tokens(&tokenize_words(sentence)))
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

fn tag_word(word: &str, sentence_start: bool, prev: Option<&str>, next: Option<&str>) -> String {
    if !word.chars().any(char::is_alphanumeric) {
        return punctuation_tag(word).to_string();
    }
    if is_number(word) {
        return "CD".to_string();
    }
    if matches!(word, "'s" | "’s" | "'S" | "’S") {
        return "POS".to_string();
    }

    let lower = word.to_lowercase();
    if let Some(tag) = CLOSED_CLASS.get(lower.as_str()) {
        return tag.to_string();
    }

    // 缩略形式（don't, they're, I'll）
    if is_contraction(&lower) {
        return "VBP".to_string();
    }

    let capitalized = word.chars().next().is_some_and(char::is_uppercase);
    if capitalized && !sentence_start {
        return if is_plural_form(&lower) && ends_like_group(&lower) {
            "NNPS".to_string()
        } else {
            "NNP".to_string()
        };
    }

    // 不定式标记或情态动词之后是动词原形
    if matches!(prev, Some("TO") | Some("MD")) {
        return "VB".to_string();
    }

    // 主语代词之后的未知词视为动词
    if prev == Some("PRP") {
        return if lower.ends_with("ed") {
            "VBD".to_string()
        } else if lower.ends_with('s') {
            "VBZ".to_string()
        } else {
            "VBP".to_string()
        };
    }

    if lower.len() > 4 && lower.ends_with("ing") {
        return if matches!(prev, Some("DT") | Some("PRP$") | Some("JJ")) {
            "NN".to_string()
        } else {
            "VBG".to_string()
        };
    }
    if lower.len() > 3 && lower.ends_with("ed") {
        return if matches!(prev, Some("VBZ") | Some("VBP") | Some("VBD") | Some("VB") | Some("VBN")) {
            "VBN".to_string()
        } else {
            "VBD".to_string()
        };
    }
    if lower.len() > 4 && lower.ends_with("ly") {
        return "RB".to_string();
    }
    if lower.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return "JJ".to_string();
    }

    if is_plural_form(&lower) {
        // 名词之后、限定词/介词之前的 -s 词更可能是第三人称单数动词
        let prev_is_noun = matches!(prev, Some("NN") | Some("NNP"));
        let next_starts_phrase = next
            .map(|n| {
                matches!(
                    CLOSED_CLASS.get(n.to_lowercase().as_str()),
                    Some(&"DT") | Some(&"PRP$") | Some(&"IN") | Some(&"PRP")
                )
            })
            .unwrap_or(false);
        if prev_is_noun && next_starts_phrase {
            return "VBZ".to_string();
        }
        return "NNS".to_string();
    }

    "NN".to_string()
}

fn is_plural_form(lower: &str) -> bool {
    lower.chars().count() > 3
        && lower.ends_with('s')
        && !NON_PLURAL_ENDINGS.iter().any(|ending| lower.ends_with(ending))
}

/// 专有名词复数只认群体后缀（Americans, Celtics），其余以 s 结尾的专有名词按单数处理
fn ends_like_group(lower: &str) -> bool {
    ["ans", "ers", "ics", "ees", "ites"].iter().any(|s| lower.ends_with(s))
}

fn is_contraction(lower: &str) -> bool {
    let normalized = lower.replace('’', "'");
    ["n't", "'re", "'ll", "'ve", "'d", "'m"]
        .iter()
        .any(|suffix| normalized.len() > suffix.len() && normalized.ends_with(suffix))
}

fn is_number(word: &str) -> bool {
    let stripped: String = word.chars().filter(|c| *c != ',').collect();
    stripped.parse::<f64>().is_ok()
}

fn punctuation_tag(word: &str) -> &'static str {
    match word {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "—" | "–" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "“" | "'" | "‘" => "``",
        "”" | "’" => "''",
        "$" | "€" | "£" | "¥" => "$",
        "#" => "#",
        _ => "SYM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(sentence: &str) -> Vec<(String, String)> {
        let tagger = LexiconTagger::new();
        tagger
            .tag_tokens(&tokenize_words(sentence))
            .into_iter()
            .map(|t| (t.word, t.tag))
            .collect()
    }

    fn nouns(sentence: &str) -> Vec<String> {
        let tagger = LexiconTagger::new();
        tagger
            .tag_tokens(&tokenize_words(sentence))
            .into_iter()
            .filter(|t| t.is_noun())
            .map(|t| t.word)
            .collect()
    }

    #[test]
    fn test_simple_sentences() {
        assert_eq!(nouns("The cat sat on the mat."), vec!["cat", "mat"]);
        assert_eq!(nouns("The dog ran in the park."), vec!["dog", "park"]);
    }

    #[test]
    fn test_closed_class_and_punctuation() {
        let tagged = tags("The cat sat on the mat.");
        assert_eq!(tagged[0].1, "DT");
        assert_eq!(tagged[2].1, "VBD");
        assert_eq!(tagged[3].1, "IN");
        assert_eq!(tagged[6].1, ".");
    }

    #[test]
    fn test_proper_nouns_and_plurals() {
        let tagged = tags("Scientists in Paris studied the glaciers carefully.");
        assert_eq!(tagged[0], ("Scientists".to_string(), "NNS".to_string()));
        assert_eq!(tagged[2], ("Paris".to_string(), "NNP".to_string()));
        assert_eq!(tagged[3].1, "VBD");
        assert_eq!(tagged[5].1, "NNS");
        assert_eq!(tagged[6].1, "RB");
    }

    #[test]
    fn test_verb_context_rules() {
        let tagged = tags("They want to travel because it rains often.");
        assert_eq!(tagged[1].1, "VBP");
        assert_eq!(tagged[3].1, "VB");
        assert_eq!(tagged[6].1, "VBZ");
    }

    #[test]
    fn test_contractions_are_not_nouns() {
        assert_eq!(nouns("We don't know the answer."), vec!["answer"]);
    }

    #[test]
    fn test_numbers_and_possessives() {
        let tagged = tags("Smith's 1,200 horses");
        assert_eq!(tagged[0].1, "NN");
        assert_eq!(tagged[1].1, "POS");
        assert_eq!(tagged[2].1, "CD");
        assert_eq!(tagged[3].1, "NNS");
    }

    #[test]
    fn test_async_trait_path() {
        let tagger = LexiconTagger::new();
        let tagged = tokio_test::block_on(tagger.tag("Water boils quickly.")).unwrap();
        assert_eq!(tagged.len(), 4);
        assert_eq!(tagger.name(), "lexicon");
    }
}
