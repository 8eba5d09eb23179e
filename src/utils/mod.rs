pub mod extractor;
pub mod file_naming;
pub mod request_memo;
pub mod validate;

pub use extractor::SafeUploadId;
pub use file_naming::{build_public_url, resolve_extension, resolve_mime_type};
pub use request_memo::memoized;
pub use validate::{validate_incoming_file, validate_upload_id};
