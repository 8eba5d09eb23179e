use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 已持久化的上传记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/types/generated/upload.ts")]
pub struct Upload {
    // 记录唯一标识（UUID）
    pub id: String,
    // 客户端提供的原始文件名，仅用于展示
    pub original_name: String,
    // 文件类型
    pub mime_type: String,
    // 文件大小（以字节为单位）
    pub size: i64,
    // 对外访问路径，以 `/` 开头
    pub url: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待写入的上传记录，`id` 与 `created_at` 由存储层生成
#[derive(Debug, Clone, PartialEq)]
pub struct NewUpload {
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
}
