//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态码。

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_gallery_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum GalleryError {
            $($variant(String),)*
        }

        impl GalleryError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GalleryError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GalleryError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(GalleryError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GalleryError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GalleryError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GalleryError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_gallery_errors! {
    MissingFile("E001", "Missing File", BAD_REQUEST),
    EmptyFile("E002", "Empty File", BAD_REQUEST),
    PayloadTooLarge("E003", "Payload Too Large", PAYLOAD_TOO_LARGE),
    MalformedForm("E004", "Malformed Form", BAD_REQUEST),
    InvalidId("E005", "Invalid Identifier", BAD_REQUEST),
    StorageWrite("E006", "Storage Write Failure", INTERNAL_SERVER_ERROR),
    MetadataCommit("E007", "Metadata Commit Failure", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E008", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E009", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E010", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Serialization("E011", "Serialization Error", INTERNAL_SERVER_ERROR),
}

impl GalleryError {
    /// 对应的 API 业务码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            GalleryError::MissingFile(_) => ErrorCode::UploadFileMissing,
            GalleryError::EmptyFile(_) => ErrorCode::UploadFileEmpty,
            GalleryError::PayloadTooLarge(_) => ErrorCode::UploadFileTooLarge,
            GalleryError::MalformedForm(_) => ErrorCode::BadRequest,
            GalleryError::InvalidId(_) => ErrorCode::UploadIdInvalid,
            GalleryError::StorageWrite(_) => ErrorCode::UploadStorageFailed,
            GalleryError::MetadataCommit(_) => ErrorCode::UploadCommitFailed,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 是否为客户端输入错误
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// 返回给调用方的信息，服务端错误不暴露内部细节
    pub fn public_message(&self) -> &str {
        if self.is_client_error() {
            self.message()
        } else {
            self.error_type()
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GalleryError {}

impl ResponseError for GalleryError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ApiResponse::error_empty(
            self.api_code(),
            self.public_message(),
        ))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GalleryError {
    fn from(err: sea_orm::DbErr) -> Self {
        GalleryError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GalleryError {
    fn from(err: std::io::Error) -> Self {
        GalleryError::StorageWrite(err.to_string())
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GalleryError::missing_file("test").code(), "E001");
        assert_eq!(GalleryError::payload_too_large("test").code(), "E003");
        assert_eq!(GalleryError::metadata_commit("test").code(), "E007");
        assert_eq!(GalleryError::database_operation("test").code(), "E010");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            GalleryError::empty_file("test").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GalleryError::payload_too_large("test").status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            GalleryError::storage_write("test").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_server_details() {
        let err = GalleryError::storage_write("No space left on device (os error 28)");
        assert_eq!(err.public_message(), "Storage Write Failure");

        let err = GalleryError::empty_file("File is empty");
        assert_eq!(err.public_message(), "File is empty");
    }

    #[test]
    fn test_format_simple() {
        let err = GalleryError::invalid_id("Invalid upload id");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid Identifier"));
        assert!(formatted.contains("Invalid upload id"));
    }

    #[test]
    fn test_io_error_maps_to_storage_write() {
        let err: GalleryError = std::io::Error::other("disk full").into();
        assert_eq!(err.api_code(), ErrorCode::UploadStorageFailed);
    }
}
