//! multipart 表单读取

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use crate::errors::{GalleryError, Result};
use crate::models::uploads::requests::IncomingFile;

/// 文件字段名
pub const FILE_FIELD: &str = "file";

/// 从表单中读取第一个名为 `file` 的文件字段
///
/// 同名的普通文本字段不算文件。读取的内容最多保留 `max_size + 1` 字节，
/// 足以让后续校验判断是否超限，而不会把超大文件整个读入内存。
pub async fn read_upload_form(mut payload: Multipart, max_size: usize) -> Result<Option<IncomingFile>> {
    let keep = max_size.saturating_add(1);

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        if name != FILE_FIELD || file_name.is_none() {
            continue;
        }

        let content_type = field.content_type().map(|ct| ct.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| GalleryError::malformed_form(format!("Failed to read upload: {e}")))?;

            let remaining = keep - data.len();
            if chunk.len() >= remaining {
                data.extend_from_slice(&chunk[..remaining]);
                break;
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(Some(IncomingFile {
            file_name,
            content_type,
            data,
        }));
    }

    Ok(None)
}
