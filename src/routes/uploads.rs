use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::UploadService;
use crate::utils::SafeUploadId;

// 懒加载的全局 UploadService 实例，存储从 app_data 中获取
pub(crate) static UPLOAD_SERVICE: Lazy<UploadService> = Lazy::new(UploadService::new_lazy);

pub async fn handle_upload(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.handle_upload(&request, payload).await
}

pub async fn list_uploads(request: HttpRequest) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.list_recent(&request).await
}

pub async fn get_upload(request: HttpRequest, id: SafeUploadId) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE.get_upload(&request, id.0).await
}

pub async fn serve_uploaded_file(
    request: HttpRequest,
    file_name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    UPLOAD_SERVICE
        .serve_file(&request, file_name.into_inner())
        .await
}

// 配置路由
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/upload", web::post().to(handle_upload))
        .service(
            web::scope("/api/uploads")
                .route("", web::get().to(list_uploads))
                .route("/{id}", web::get().to(get_upload)),
        );
}

/// 已上传文件的公开访问路由，`prefix` 来自上传目录，如 `/uploads`
pub fn configure_public_file_routes(prefix: String) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.route(
            &format!("{prefix}/{{file_name}}"),
            web::get().to(serve_uploaded_file),
        );
    }
}
