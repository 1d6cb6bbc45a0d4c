//! 外部词性标注服务客户端
//!
//! 请求: `POST {tagger_url}` `{"text": "<sentence>"}`
//! 响应: `{"tokens": [["word", "TAG"], ...]}`

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::tagger::{PosTagger, TaggedToken};

#[derive(Debug, Serialize)]
struct TagRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TagResponse {
    tokens: Vec<(String, String)>,
}

/// HTTP 词性标注器
pub struct HttpTagger {
    client: Client,
    url: String,
}

impl HttpTagger {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PosTagger for HttpTagger {
    async fn tag(&self, sentence: &str) -> AppResult<Vec<TaggedToken>> {
        debug!("调用词性标注服务: {} ({} 字符)", self.url, sentence.len());

        let response = self
            .client
            .post(&self.url)
            .json(&TagRequest { text: sentence })
            .send()
            .await
            .map_err(|e| {
                warn!("词性标注服务请求失败: {}", e);
                AppError::tagging_failed(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::tagging_failed(format!(
                "标注服务返回 HTTP {}",
                status
            )));
        }

        let body: TagResponse = response.json().await.map_err(AppError::tagging_failed)?;

        Ok(body
            .tokens
            .into_iter()
            .map(|(word, tag)| TaggedToken::new(word, tag))
            .collect())
    }

    fn name(&self) -> &str {
        &self.url
    }
}
