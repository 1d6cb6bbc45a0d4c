//! 应用生命周期：初始化模型、绑定端口、提供服务

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::orchestrator::router::build_router;
use crate::orchestrator::state::AppState;
use crate::utils::logging::log_startup;
use crate::workflow::ModelContext;

/// 应用主结构
pub struct App {
    config: Config,
    state: Arc<AppState>,
}

impl App {
    /// 初始化应用
    ///
    /// 模型加载失败不会阻止启动，此时出题和摘要接口返回 503
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let models = match ModelContext::from_config(&config) {
            Ok(models) => Some(models),
            Err(e) => {
                error!("❌ 模型加载失败: {}", e);
                warn!("⚠️ 服务将继续启动，出题请求会返回 503");
                None
            }
        };

        Ok(Self::with_models(config, models))
    }

    /// 使用已构建好的模型上下文创建应用
    pub fn with_models(config: Config, models: Option<ModelContext>) -> Self {
        let state = Arc::new(AppState::new(config.clone(), models));
        Self { config, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// 运行应用主逻辑，直到收到 Ctrl+C
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法绑定地址 {}", self.config.bind_addr))?;
        info!("✓ 服务已启动: http://{}", listener.local_addr()?);

        if !self.state.is_ready() {
            warn!("⚠️ 模型未就绪，仅健康检查可用");
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务异常退出")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
}
