//! 文本分块
//!
//! 按空行切分段落，贪心地把段落装进约 `max_tokens * 4` 个字符的块里。
//! 段落不会被拆开：单个超长段落自成一个超长块。

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Chunk;

/// 每个 token 约等于 4 个字符
pub const CHARS_PER_TOKEN: usize = 4;

/// 段落分隔（空行），兼容 CRLF
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\r?\n").unwrap());

/// 计入预算的段落分隔长度
const SEPARATOR_CHARS: usize = 2;

/// 将文档切分为文本块
///
/// # 参数
/// - `text`: 文档全文
/// - `max_tokens`: 每块的近似 token 上限
///
/// # 返回
/// 按原文顺序排列的文本块；空输入返回空列表。
/// 每个块都是原文中连续的一段（去掉首尾空白），原文不做任何改写。
pub fn chunk_text(text: &str, max_tokens: usize) -> Vec<Chunk> {
    let budget = max_tokens.saturating_mul(CHARS_PER_TOKEN);

    let mut chunks = Vec::new();
    let mut current: Option<Range<usize>> = None;
    let mut current_len = 0usize;

    for paragraph in paragraph_spans(text) {
        let paragraph_len = text[paragraph.clone()].chars().count();

        if let Some(span) = current.take() {
            if current_len + paragraph_len >= budget {
                push_chunk(&mut chunks, &text[span]);
                current_len = 0;
            } else {
                current = Some(span);
            }
        }

        current = Some(match current {
            Some(span) => span.start..paragraph.end,
            None => paragraph,
        });
        current_len += paragraph_len + SEPARATOR_CHARS;
    }

    if let Some(span) = current {
        push_chunk(&mut chunks, &text[span]);
    }
    chunks
}

/// 段落在原文中的字节区间
fn paragraph_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for separator in PARAGRAPH_BREAK.find_iter(text) {
        spans.push(start..separator.start());
        start = separator.end();
    }
    spans.push(start..text.len());
    spans
}

fn push_chunk(chunks: &mut Vec<Chunk>, span: &str) {
    let trimmed = span.trim();
    if !trimmed.is_empty() {
        chunks.push(Chunk::new(trimmed));
    }
}
