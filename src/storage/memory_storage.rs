//! 进程内存储实现
//!
//! 数据只保存在内存中，适用于测试与临时运行。

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::Storage;
use crate::errors::{GalleryError, Result};
use crate::models::uploads::entities::{NewUpload, Upload};

pub const MEMORY_URL_SCHEME: &str = "memory://";

#[derive(Default)]
pub struct MemoryStorage {
    // 按插入顺序保存
    uploads: RwLock<Vec<Upload>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.uploads.read().map(|u| u.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> GalleryError {
    GalleryError::database_operation("内存存储锁已损坏")
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_upload(&self, upload: NewUpload) -> Result<Upload> {
        let record = Upload {
            id: Uuid::new_v4().to_string(),
            original_name: upload.original_name,
            mime_type: upload.mime_type,
            size: upload.size,
            url: upload.url,
            created_at: chrono::Utc::now(),
        };

        self.uploads
            .write()
            .map_err(|_| poisoned())?
            .push(record.clone());

        Ok(record)
    }

    async fn list_recent_uploads(&self, limit: u64) -> Result<Vec<Upload>> {
        let uploads = self.uploads.read().map_err(|_| poisoned())?;

        // 先倒序再稳定排序，时间相同的记录保持后插入者在前
        let mut recent: Vec<Upload> = uploads.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(recent)
    }

    async fn get_upload_by_id(&self, id: &str) -> Result<Option<Upload>> {
        let uploads = self.uploads.read().map_err(|_| poisoned())?;
        Ok(uploads.iter().find(|u| u.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_upload(name: &str) -> NewUpload {
        NewUpload {
            original_name: name.to_string(),
            mime_type: "image/png".to_string(),
            size: 3,
            url: format!("/uploads/{name}"),
        }
    }

    #[actix_web::test]
    async fn test_create_assigns_unique_ids() {
        let storage = MemoryStorage::new();
        let a = storage.create_upload(new_upload("a.png")).await.unwrap();
        let b = storage.create_upload(new_upload("a.png")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert_eq!(storage.len(), 2);
    }

    #[actix_web::test]
    async fn test_list_recent_is_newest_first_and_bounded() {
        let storage = MemoryStorage::new();
        for i in 0..25 {
            storage
                .create_upload(new_upload(&format!("{i}.png")))
                .await
                .unwrap();
        }

        let recent = storage.list_recent_uploads(20).await.unwrap();
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].original_name, "24.png");
        assert_eq!(recent[19].original_name, "5.png");
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[actix_web::test]
    async fn test_get_by_id() {
        let storage = MemoryStorage::new();
        let created = storage.create_upload(new_upload("cat.png")).await.unwrap();

        let found = storage.get_upload_by_id(&created.id).await.unwrap();
        assert_eq!(found, Some(created));

        let missing = storage
            .get_upload_by_id(&Uuid::new_v4().to_string())
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
