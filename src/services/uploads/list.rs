use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UploadService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::uploads::entities::Upload;
use crate::models::uploads::responses::UploadListResponse;
use crate::storage::Storage;
use crate::utils::memoized;

/// 最近上传列表的固定窗口大小
pub const RECENT_UPLOADS_LIMIT: u64 = 20;

/// 请求级记忆表中的操作名
const RECENT_UPLOADS_KEY: &str = "upload.all";

/// 最近的上传记录，最多 20 条，按创建时间倒序
pub async fn recent_uploads(storage: &dyn Storage) -> Result<Vec<Upload>> {
    storage.list_recent_uploads(RECENT_UPLOADS_LIMIT).await
}

/// 同一请求内只查询一次最近上传列表
pub async fn recent_uploads_for_request(
    service: &UploadService,
    request: &HttpRequest,
) -> Result<Vec<Upload>> {
    let storage = service.get_storage(request)?;
    memoized(request, RECENT_UPLOADS_KEY, || async move {
        recent_uploads(storage.as_ref()).await
    })
    .await
}

pub async fn list_recent(
    service: &UploadService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let items = recent_uploads_for_request(service, request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UploadListResponse { items },
        "Uploads retrieved successfully",
    )))
}
