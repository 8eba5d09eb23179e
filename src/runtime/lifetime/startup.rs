use crate::config::{AppConfig, UploadConfig};
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub upload: UploadConfig,
}

/// 准备服务器启动的上下文
/// 包括存储后端和上传目录配置
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized");

    let upload = config.upload.clone();
    warn!(
        "Uploads are stored in '{}' and served under '{}/' (limit {} bytes)",
        upload.dir,
        upload.public_prefix(),
        upload.max_size
    );

    Ok(StartupContext { storage, upload })
}
