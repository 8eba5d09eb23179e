use serde::Serialize;

/// API 业务码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,

    // 上传相关
    UploadFileMissing = 3001,
    UploadFileEmpty = 3002,
    UploadFileTooLarge = 3003,
    UploadStorageFailed = 3004,
    UploadCommitFailed = 3005,
    UploadIdInvalid = 3006,
}
