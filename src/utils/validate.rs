use uuid::Uuid;

use crate::errors::GalleryError;
use crate::models::uploads::requests::IncomingFile;

/// 校验上传记录 ID 格式（UUID）
pub fn validate_upload_id(id: &str) -> Result<Uuid, &'static str> {
    let id = id.trim();
    if id.is_empty() {
        return Err("Upload id is required");
    }
    Uuid::parse_str(id).map_err(|_| "Upload id must be a valid UUID")
}

/// 校验上传文件，按顺序检查，第一个失败项即返回：
///
/// 1. 必须存在文件字段
/// 2. 文件不能为空
/// 3. 文件大小不能超过上限
pub fn validate_incoming_file(
    file: Option<&IncomingFile>,
    max_size: usize,
) -> Result<&IncomingFile, GalleryError> {
    let file = file.ok_or_else(|| GalleryError::missing_file("Image file is required"))?;

    if file.is_empty() {
        return Err(GalleryError::empty_file("File is empty"));
    }

    if file.len() > max_size {
        return Err(GalleryError::payload_too_large(format!(
            "File exceeds the {} size limit",
            format_size_limit(max_size)
        )));
    }

    Ok(file)
}

/// 把字节上限格式化为可读文本，如 10MB
fn format_size_limit(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_FILE_SIZE;
    use crate::errors::GalleryError;

    #[test]
    fn test_valid_upload_id() {
        let id = Uuid::new_v4();
        assert_eq!(validate_upload_id(&id.to_string()), Ok(id));
    }

    #[test]
    fn test_invalid_upload_id() {
        assert_eq!(validate_upload_id(""), Err("Upload id is required"));
        assert_eq!(
            validate_upload_id("clx0abc123"),
            Err("Upload id must be a valid UUID")
        );
    }

    #[test]
    fn test_missing_file() {
        let result = validate_incoming_file(None, MAX_FILE_SIZE);
        assert!(matches!(result, Err(GalleryError::MissingFile(_))));
    }

    #[test]
    fn test_empty_file() {
        let file = IncomingFile::new(Some("a.png"), Some("image/png"), Vec::new());
        let result = validate_incoming_file(Some(&file), MAX_FILE_SIZE);
        assert!(matches!(result, Err(GalleryError::EmptyFile(_))));
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        let at_limit = IncomingFile::new(Some("a.png"), None, vec![0u8; MAX_FILE_SIZE]);
        assert!(validate_incoming_file(Some(&at_limit), MAX_FILE_SIZE).is_ok());

        let over = IncomingFile::new(Some("a.png"), None, vec![0u8; MAX_FILE_SIZE + 1]);
        match validate_incoming_file(Some(&over), MAX_FILE_SIZE) {
            Err(GalleryError::PayloadTooLarge(msg)) => {
                assert_eq!(msg, "File exceeds the 10MB size limit")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_format_size_limit() {
        assert_eq!(format_size_limit(MAX_FILE_SIZE), "10MB");
        assert_eq!(format_size_limit(100 * 1024), "100KB");
        assert_eq!(format_size_limit(1000), "1000 bytes");
    }
}
