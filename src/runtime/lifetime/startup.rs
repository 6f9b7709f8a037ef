use crate::config::AppConfig;
use crate::storage::{Storage, create_storage};
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 启动前准备：连接存储并完成迁移
pub async fn prepare_server_startup() -> std::io::Result<StartupContext> {
    let config = AppConfig::get();

    if config.jwt.secret == crate::config::DEFAULT_JWT_SECRET {
        warn!("Using the built-in development JWT secret, set JWT_SECRET before deploying");
    }

    let storage = create_storage().await.map_err(|e| {
        std::io::Error::other(format!("Failed to initialize storage: {e}"))
    })?;

    info!(
        "{} storage ready (invite code attempts: {})",
        config.app.system_name, config.classes.code_max_attempts
    );

    Ok(StartupContext { storage })
}
