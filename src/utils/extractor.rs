//! 安全的路径参数提取器
//!
//! 在进入业务逻辑之前校验路径参数，格式错误时直接返回 400。

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::errors::GalleryError;
use crate::utils::validate::validate_upload_id;

/// 路径参数 `{id}` 中的上传记录 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeUploadId(pub Uuid);

impl FromRequest for SafeUploadId {
    type Error = GalleryError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        ready(
            validate_upload_id(raw)
                .map(SafeUploadId)
                .map_err(GalleryError::invalid_id),
        )
    }
}
