//! 上传记录存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{UploadActiveModel, Uploads};
use crate::entity::uploads::Column;
use crate::errors::{GalleryError, Result};
use crate::models::uploads::entities::{NewUpload, Upload};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建上传记录
    pub async fn create_upload_impl(&self, upload: NewUpload) -> Result<Upload> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = UploadActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            original_name: Set(upload.original_name),
            mime_type: Set(upload.mime_type),
            size: Set(upload.size),
            url: Set(upload.url),
            created_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GalleryError::database_operation(format!("创建上传记录失败: {e}")))?;

        Ok(result.into_upload())
    }

    /// 最近的上传记录，按创建时间倒序
    pub async fn list_recent_uploads_impl(&self, limit: u64) -> Result<Vec<Upload>> {
        let models = Uploads::find()
            .order_by_desc(Column::CreatedAt)
            // 同一毫秒内的记录按 ID 排列，只保证结果稳定，不反映插入先后
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| GalleryError::database_operation(format!("查询上传列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_upload()).collect())
    }

    /// 通过 ID 获取上传记录
    pub async fn get_upload_by_id_impl(&self, id: &str) -> Result<Option<Upload>> {
        let result = Uploads::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| GalleryError::database_operation(format!("查询上传记录失败: {e}")))?;

        Ok(result.map(|m| m.into_upload()))
    }
}
