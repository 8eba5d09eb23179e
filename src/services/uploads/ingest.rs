use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use super::UploadService;
use super::form::read_upload_form;
use crate::config::UploadConfig;
use crate::errors::{GalleryError, Result};
use crate::models::ApiResponse;
use crate::models::uploads::entities::{NewUpload, Upload};
use crate::models::uploads::requests::IncomingFile;
use crate::models::uploads::responses::UploadResponse;
use crate::storage::Storage;
use crate::utils::file_naming::generate_stored_name;
use crate::utils::{
    build_public_url, resolve_extension, resolve_mime_type, validate_incoming_file,
};

/// 客户端未提供文件名时记录的原始文件名
pub const DEFAULT_ORIGINAL_NAME: &str = "upload";

pub async fn handle_upload(
    service: &UploadService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = service.get_upload_config(request);
    let storage = service.get_storage(request)?;

    let file = read_upload_form(payload, config.max_size).await?;

    match ingest_upload(storage.as_ref(), &config, file).await {
        Ok(upload) => Ok(HttpResponse::Created().json(ApiResponse::success(
            UploadResponse { upload },
            "File uploaded successfully",
        ))),
        Err(e) => {
            if e.is_client_error() {
                warn!("Rejected upload: {}", e);
            } else {
                error!("{}", e);
            }
            Err(e.into())
        }
    }
}

/// 上传流程：校验 → 解析扩展名 → 写入文件 → 提交元数据
///
/// 所有校验都在产生副作用之前完成。文件写入完成后才插入记录；
/// 插入失败时尽力删除刚写入的文件。
pub async fn ingest_upload(
    storage: &dyn Storage,
    config: &UploadConfig,
    file: Option<IncomingFile>,
) -> Result<Upload> {
    let file = validate_incoming_file(file.as_ref(), config.max_size)?;

    let original_name = file
        .file_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ORIGINAL_NAME)
        .to_string();
    let declared_type = file.content_type.as_deref().filter(|t| !t.is_empty());

    let extension = resolve_extension(&original_name, declared_type.unwrap_or_default());
    let stored_name = generate_stored_name(&extension);

    let path = write_stored_file(&config.storage_dir(), &stored_name, &file.data).await?;

    let new_upload = NewUpload {
        original_name,
        mime_type: resolve_mime_type(declared_type, &extension),
        size: file.len() as i64,
        url: build_public_url(&config.dir, &stored_name),
    };

    match storage.create_upload(new_upload).await {
        Ok(upload) => {
            info!(
                "Stored upload {} ({} bytes) at {}",
                upload.id, upload.size, upload.url
            );
            Ok(upload)
        }
        Err(e) => {
            discard_orphan(&path).await;
            Err(GalleryError::metadata_commit(e.message()))
        }
    }
}

/// 确保目录存在并写入文件，已存在同名文件时失败而不是覆盖
async fn write_stored_file(dir: &Path, stored_name: &str, data: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).await.map_err(|e| {
        GalleryError::storage_write(format!("创建上传目录 {} 失败: {e}", dir.display()))
    })?;

    let path = dir.join(stored_name);
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
        .map_err(|e| {
            GalleryError::storage_write(format!("创建文件 {} 失败: {e}", path.display()))
        })?;

    let written = async {
        file.write_all(data).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        discard_orphan(&path).await;
        return Err(GalleryError::storage_write(format!(
            "写入文件 {} 失败: {e}",
            path.display()
        )));
    }

    Ok(path)
}

async fn discard_orphan(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to remove orphaned upload {}: {}", path.display(), e);
    }
}
