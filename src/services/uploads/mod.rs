pub mod form;
pub mod get;
pub mod ingest;
pub mod list;
pub mod serve;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::{GalleryError, Result};
use crate::storage::Storage;

/// 上传服务，存储后端在每个请求中从 app_data 取得
pub struct UploadService;

impl UploadService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        request
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .map(|storage| storage.get_ref().clone())
            .ok_or_else(|| GalleryError::database_config("Storage not found in app data"))
    }

    pub(crate) fn get_upload_config(&self, request: &HttpRequest) -> UploadConfig {
        request
            .app_data::<web::Data<UploadConfig>>()
            .map(|config| config.get_ref().clone())
            .unwrap_or_default()
    }

    // 处理文件上传
    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        ingest::handle_upload(self, request, payload).await
    }

    // 最近上传列表
    pub async fn list_recent(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_recent(self, request).await
    }

    // 按 ID 查询上传记录
    pub async fn get_upload(&self, request: &HttpRequest, id: Uuid) -> ActixResult<HttpResponse> {
        get::get_upload(self, request, id).await
    }

    // 读取已存储的文件
    pub async fn serve_file(
        &self,
        request: &HttpRequest,
        file_name: String,
    ) -> ActixResult<HttpResponse> {
        serve::serve_file(self, request, &file_name).await
    }
}
