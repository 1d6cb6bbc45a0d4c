//! 组卷流程 - 流程层
//!
//! 核心职责：定义"一份文档"到"一组题目"的完整流程
//!
//! 流程顺序（逐块进行，配额满即停）：
//! 1. 文档分块，只取前 `max_chunks` 块
//! 2. 选择题：抽取候选答案 → 生成题干 → 查重 → 选干扰项 → 打乱选项
//! 3. 开放题：生成题干 → 查重 → 定题型
//!
//! 逐块模式（[`QuestionAssembler::assemble_per_chunk`]）没有总配额：
//! 只取前 `per_chunk_max_chunks` 块，每块各自生成、各自查重

use std::iter;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{
    AnswerForm, Chunk, ChunkQuestion, ChunkQuestionKind, ChunkRequest, ExamRequest,
    GenerationMode, QuestionRecord, QuestionType,
};
use crate::services::sampling::{coin_flip, shuffle};
use crate::services::{
    chunk_text, is_near_duplicate, CandidateExtractor, DistractorSelector, QuestionGenerator,
};
use crate::utils::truncate_text;
use crate::workflow::exam_ctx::ExamCtx;
use crate::workflow::model_context::ModelContext;

/// 组卷策略（来自配置，单次请求内不变）
#[derive(Debug, Clone)]
pub struct AssemblyPolicy {
    pub chunk_max_tokens: usize,
    pub max_chunks: usize,
    pub per_chunk_max_chunks: usize,
    pub mcq_candidates_per_chunk: usize,
    pub open_questions_per_chunk: usize,
    pub distractor_count: usize,
    pub distractor_pool_size: usize,
    pub similarity_threshold: f64,
}

impl From<&Config> for AssemblyPolicy {
    fn from(config: &Config) -> Self {
        Self {
            chunk_max_tokens: config.chunk_max_tokens,
            max_chunks: config.max_chunks,
            per_chunk_max_chunks: config.per_chunk_max_chunks,
            mcq_candidates_per_chunk: config.mcq_candidates_per_chunk,
            open_questions_per_chunk: config.open_questions_per_chunk,
            distractor_count: config.distractor_count,
            distractor_pool_size: config.distractor_pool_size,
            similarity_threshold: config.similarity_threshold,
        }
    }
}

impl Default for AssemblyPolicy {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// 已接受的题目
///
/// 编号和查重都只在这里发生：题目一旦入列就不再修改
struct QuestionBatch {
    quota: usize,
    threshold: f64,
    records: Vec<QuestionRecord>,
}

impl QuestionBatch {
    fn new(quota: usize, threshold: f64) -> Self {
        Self {
            quota,
            threshold,
            records: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.records.len() >= self.quota
    }

    fn is_duplicate(&self, question: &str) -> bool {
        is_near_duplicate(
            question,
            self.records.iter().map(|r| r.question.as_str()),
            self.threshold,
        )
    }

    fn next_id(&self) -> usize {
        self.records.len() + 1
    }

    fn push(&mut self, record: QuestionRecord) {
        self.records.push(record);
    }

    fn into_records(self) -> Vec<QuestionRecord> {
        self.records
    }
}

/// 组卷流程
///
/// - 决定分块、配额、题型顺序
/// - 不持有模型之外的任何状态，可在请求间共享
/// - 只依赖业务能力（services）
pub struct QuestionAssembler {
    extractor: CandidateExtractor,
    distractors: DistractorSelector,
    generator: QuestionGenerator,
    policy: AssemblyPolicy,
}

impl QuestionAssembler {
    pub fn new(models: &ModelContext, policy: AssemblyPolicy) -> Self {
        let extractor = CandidateExtractor::new(models.tagger.clone());
        Self {
            distractors: DistractorSelector::new(extractor.clone(), policy.distractor_pool_size),
            extractor,
            generator: QuestionGenerator::new(models.question_model.clone()),
            policy,
        }
    }

    /// 从全文生成最多 `request.count` 道题
    ///
    /// 文本太短时返回的题目可能少于请求数量
    pub async fn assemble(
        &self,
        text: &str,
        request: &ExamRequest,
        ctx: &ExamCtx,
    ) -> AppResult<Vec<QuestionRecord>> {
        let chunks = chunk_text(text, self.policy.chunk_max_tokens);
        let total = chunks.len();
        let chunks: Vec<Chunk> = chunks.into_iter().take(self.policy.max_chunks).collect();
        info!(
            "{} 📄 文档分为 {} 块，使用前 {} 块",
            ctx,
            total,
            chunks.len()
        );

        let mut batch = QuestionBatch::new(request.count, self.policy.similarity_threshold);

        for (index, chunk) in chunks.iter().enumerate() {
            if batch.is_full() {
                break;
            }
            debug!(
                "{} 处理第 {}/{} 块: {}",
                ctx,
                index + 1,
                chunks.len(),
                truncate_text(chunk, 40)
            );

            if request.wants(QuestionType::Mcq) {
                self.collect_mcq(chunk, request, &mut batch, ctx).await?;
            }
            if request.wants_open() {
                self.collect_open(chunk, request, &mut batch, ctx).await?;
            }
        }

        Ok(batch.into_records())
    }

    /// 逐块出题：每块独立生成最多 `request.num_questions` 道题
    ///
    /// 选择题只在同一块内查重；问答题直接采用模型输出（模型层已去重）
    pub async fn assemble_per_chunk(
        &self,
        text: &str,
        request: &ChunkRequest,
        ctx: &ExamCtx,
    ) -> AppResult<Vec<ChunkQuestion>> {
        let chunks: Vec<Chunk> = chunk_text(text, self.policy.chunk_max_tokens)
            .into_iter()
            .take(self.policy.per_chunk_max_chunks)
            .collect();
        info!("{} 📄 逐块出题，使用 {} 块", ctx, chunks.len());

        let mut results = Vec::new();
        for chunk in &chunks {
            let questions = match request.mode {
                GenerationMode::Qa => self.chunk_qa(chunk, request.num_questions).await?,
                GenerationMode::Mcq => self.chunk_mcq(chunk, request.num_questions, ctx).await?,
            };
            results.extend(questions);
        }

        Ok(results)
    }

    async fn chunk_qa(&self, chunk: &Chunk, num_questions: usize) -> AppResult<Vec<ChunkQuestion>> {
        let questions = self.generator.generate(chunk, num_questions).await?;
        Ok(questions
            .into_iter()
            .map(|question| ChunkQuestion {
                kind: ChunkQuestionKind::Qa,
                question,
                options: None,
                answer: None,
                context: chunk.to_string(),
            })
            .collect())
    }

    async fn chunk_mcq(
        &self,
        chunk: &Chunk,
        num_questions: usize,
        ctx: &ExamCtx,
    ) -> AppResult<Vec<ChunkQuestion>> {
        // 候选数取题数的 3 倍，为查重淘汰留余量
        let answers = self
            .extractor
            .extract(chunk, num_questions.saturating_mul(3))
            .await?;

        let mut accepted: Vec<ChunkQuestion> = Vec::new();
        for answer in answers {
            if accepted.len() >= num_questions {
                break;
            }

            let question = self.generator.generate_for_answer(&answer, chunk).await?;
            let seen = accepted.iter().map(|q| q.question.as_str());
            if is_near_duplicate(&question, seen, self.policy.similarity_threshold) {
                debug!("{} 跳过重复题目: {}", ctx, truncate_text(&question, 50));
                continue;
            }

            let distractors = self
                .distractors
                .distractors(&answer, chunk, self.policy.distractor_count)
                .await?;
            let (options, _) = build_options(distractors, &answer);

            accepted.push(ChunkQuestion {
                kind: ChunkQuestionKind::Mcq,
                question,
                options: Some(options),
                answer: Some(answer),
                context: chunk.to_string(),
            });
        }

        Ok(accepted)
    }

    /// 针对一个文本块生成选择题
    async fn collect_mcq(
        &self,
        chunk: &Chunk,
        request: &ExamRequest,
        batch: &mut QuestionBatch,
        ctx: &ExamCtx,
    ) -> AppResult<()> {
        if batch.is_full() {
            return Ok(());
        }

        let answers = self
            .extractor
            .extract(chunk, self.policy.mcq_candidates_per_chunk)
            .await?;

        for answer in answers {
            if batch.is_full() {
                break;
            }

            let question = self.generator.generate_for_answer(&answer, chunk).await?;
            if batch.is_duplicate(&question) {
                debug!("{} 跳过重复题目: {}", ctx, truncate_text(&question, 50));
                continue;
            }

            let distractors = self
                .distractors
                .distractors(&answer, chunk, self.policy.distractor_count)
                .await?;
            let (options, correct) = build_options(distractors, &answer);

            let mut record = QuestionRecord {
                id: batch.next_id(),
                kind: QuestionType::Mcq,
                question,
                options: Some(options),
                correct: None,
                answer: None,
                context: None,
            };
            match request.answer_form {
                AnswerForm::Index => record.correct = Some(correct),
                AnswerForm::Value => record.answer = Some(answer),
            }
            if request.include_context {
                record = record.with_context(chunk.as_str());
            }

            debug!("{} ✓ 选择题 #{}", ctx, record.id);
            batch.push(record);
        }

        Ok(())
    }

    /// 针对一个文本块生成开放题
    async fn collect_open(
        &self,
        chunk: &Chunk,
        request: &ExamRequest,
        batch: &mut QuestionBatch,
        ctx: &ExamCtx,
    ) -> AppResult<()> {
        if batch.is_full() {
            return Ok(());
        }

        let questions = self
            .generator
            .generate(chunk, self.policy.open_questions_per_chunk)
            .await?;

        for question in questions {
            if batch.is_full() {
                break;
            }
            if batch.is_duplicate(&question) {
                debug!("{} 跳过重复题目: {}", ctx, truncate_text(&question, 50));
                continue;
            }

            let kind = open_question_type(request);
            let mut record = QuestionRecord::open(batch.next_id(), kind, question);
            if request.include_context {
                record = record.with_context(chunk.as_str());
            }

            debug!("{} ✓ {} 题 #{}", ctx, kind, record.id);
            batch.push(record);
        }

        Ok(())
    }
}

/// 干扰项加正确答案，整体随机打乱，返回选项和正确答案下标
fn build_options(distractors: Vec<String>, answer: &str) -> (Vec<String>, usize) {
    let mut tagged: Vec<(bool, String)> = distractors
        .into_iter()
        .map(|d| (false, d))
        .chain(iter::once((true, answer.to_string())))
        .collect();
    shuffle(&mut tagged);

    let correct = tagged
        .iter()
        .position(|(is_answer, _)| *is_answer)
        .unwrap_or_default();
    let options = tagged.into_iter().map(|(_, option)| option).collect();
    (options, correct)
}

/// 同时请求简答和论述时随机二选一
fn open_question_type(request: &ExamRequest) -> QuestionType {
    match (request.wants(QuestionType::Short), request.wants(QuestionType::Long)) {
        (true, true) => {
            if coin_flip() {
                QuestionType::Short
            } else {
                QuestionType::Long
            }
        }
        (true, false) => QuestionType::Short,
        _ => QuestionType::Long,
    }
}
