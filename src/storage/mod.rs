use std::sync::Arc;

use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::uploads::entities::{NewUpload, Upload};

pub mod memory_storage;
pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 上传记录管理方法
    // 创建上传记录，生成 ID 与创建时间
    async fn create_upload(&self, upload: NewUpload) -> Result<Upload>;
    // 按创建时间倒序列出最近的上传记录
    async fn list_recent_uploads(&self, limit: u64) -> Result<Vec<Upload>>;
    // 通过ID获取上传记录
    async fn get_upload_by_id(&self, id: &str) -> Result<Option<Upload>>;
}

/// 根据数据库 URL 创建存储后端
///
/// `memory://` 使用进程内存储，其余 URL 交给 SeaORM。
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    if config.url.starts_with(memory_storage::MEMORY_URL_SCHEME) {
        warn!("Using in-memory storage, uploads metadata will not survive a restart");
        return Ok(Arc::new(memory_storage::MemoryStorage::new()));
    }

    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
