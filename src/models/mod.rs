pub mod common;
pub mod uploads;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;
pub use common::AppStartTime;
