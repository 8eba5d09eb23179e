use serde::Serialize;
use ts_rs::TS;

use super::entities::Upload;

/// 上传成功后的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/types/generated/upload.ts")]
pub struct UploadResponse {
    pub upload: Upload,
}

/// 按 ID 查询的响应，未找到时 `upload` 为 null
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/types/generated/upload.ts")]
pub struct UploadDetailResponse {
    pub upload: Option<Upload>,
}

/// 最近上传列表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/types/generated/upload.ts")]
pub struct UploadListResponse {
    pub items: Vec<Upload>,
}
