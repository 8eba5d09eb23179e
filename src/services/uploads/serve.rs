use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::io::ErrorKind;
use tokio::fs;

use super::UploadService;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_naming::is_safe_stored_name;

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, "File not found"))
}

pub async fn serve_file(
    service: &UploadService,
    request: &HttpRequest,
    file_name: &str,
) -> ActixResult<HttpResponse> {
    if !is_safe_stored_name(file_name) {
        return Ok(not_found());
    }

    let config = service.get_upload_config(request);
    let path = config.storage_dir().join(file_name);

    let data = match fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(not_found()),
        Err(e) => {
            tracing::error!("读取文件 {} 失败: {}", path.display(), e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    // 上传内容不可信，禁止脚本执行与类型嗅探
    Ok(HttpResponse::Ok()
        .content_type(mime.essence_str())
        .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .insert_header((
            header::CONTENT_SECURITY_POLICY,
            "default-src 'none'; style-src 'unsafe-inline'; sandbox",
        ))
        .body(data))
}
