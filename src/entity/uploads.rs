//! 上传记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "uploads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
    // 毫秒时间戳
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_upload(self) -> crate::models::uploads::entities::Upload {
        use crate::models::uploads::entities::Upload;
        use chrono::{DateTime, Utc};

        Upload {
            id: self.id,
            original_name: self.original_name,
            mime_type: self.mime_type,
            size: self.size,
            url: self.url,
            created_at: DateTime::<Utc>::from_timestamp_millis(self.created_at)
                .unwrap_or_default(),
        }
    }
}
