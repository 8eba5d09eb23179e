//! 预导入模块，方便使用

pub use super::uploads::{ActiveModel as UploadActiveModel, Entity as Uploads};
