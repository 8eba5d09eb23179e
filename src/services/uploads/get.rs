use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::UploadService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::uploads::entities::Upload;
use crate::models::uploads::responses::UploadDetailResponse;
use crate::storage::Storage;

/// 按 ID 查找上传记录，不存在时返回 `None` 而不是错误
pub async fn find_upload(storage: &dyn Storage, id: Uuid) -> Result<Option<Upload>> {
    storage.get_upload_by_id(&id.to_string()).await
}

pub async fn get_upload(
    service: &UploadService,
    request: &HttpRequest,
    id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let upload = find_upload(storage.as_ref(), id).await?;

    let message = if upload.is_some() {
        "Upload retrieved successfully"
    } else {
        "Upload not found"
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UploadDetailResponse { upload },
        message,
    )))
}
