/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::ExamCtx;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 info，开启详细日志时本 crate 使用 debug。
/// 配置了日志文件时写入文件（追加），否则输出到终端。
pub fn init(config: &Config) -> Result<()> {
    let default_directive = if config.verbose_logging {
        "info,exam_generator=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(false);

    match &config.log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("日志初始化失败: {}", e))?;
        }
        None => {
            builder
                .try_init()
                .map_err(|e| anyhow::anyhow!("日志初始化失败: {}", e))?;
        }
    }
    Ok(())
}

/// 以追加方式打开日志文件，并写入本次启动的文件头
fn open_log_file(log_file_path: &str) -> Result<File> {
    let log_header = format!(
        "{}\n出题服务日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format(TIME_FORMAT),
        "=".repeat(60)
    );
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    file.write_all(log_header.as_bytes())?;
    Ok(file)
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 出题服务启动");
    info!("🌐 监听地址: {}", config.bind_addr);
    info!("🤖 出题模型: {}", config.llm_model_name);
    info!("📝 摘要模型: {}", config.summary_model_name);
    match &config.tagger_url {
        Some(url) => info!("🏷️ 词性标注服务: {}", url),
        None => info!("🏷️ 词性标注: 内置词典标注器"),
    }
    info!(
        "📊 每文档最多 {} 个文本块, 每块约 {} tokens",
        config.max_chunks, config.chunk_max_tokens
    );
    info!("{}", "=".repeat(60));
}

/// 记录出题请求开始
pub fn log_request(ctx: &ExamCtx, count: usize, types: &str) {
    info!("{} 📥 收到出题请求: 数量 {}, 题型 {}", ctx, count, types);
}

/// 记录出题请求完成
pub fn log_request_complete(ctx: &ExamCtx, generated: usize, requested: usize) {
    if generated < requested {
        info!(
            "{} ✓ 出题完成: {}/{}（文本不足或重复过多，题目数量未达到要求）",
            ctx, generated, requested
        );
    } else {
        info!("{} ✓ 出题完成: {}/{}", ctx, generated, requested);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
