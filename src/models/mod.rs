pub mod chunk;
pub mod question;
pub mod request;

pub use chunk::Chunk;
pub use question::{ChunkQuestion, ChunkQuestionKind, QuestionRecord, QuestionType};
pub use request::{
    parse_form_bool, AnswerForm, ChunkRequest, Difficulty, ExamRequest, GenerationMode,
};
