//! 基础设施层
//!
//! 持有外部黑盒（标注器、生成模型、数据源），只暴露能力，不认识题目和请求

pub mod data_source;
pub mod http_tagger;
pub mod lexicon_tagger;
pub mod mock;
pub mod tagger;
pub mod text_model;
pub mod tokenizer;

pub use data_source::{DataSource, DatabaseSource, FileSource};
pub use http_tagger::HttpTagger;
pub use lexicon_tagger::LexiconTagger;
pub use tagger::{PosTagger, TaggedToken};
pub use text_model::{OpenAiTextModel, TextModel};
