pub mod uploads;

pub use uploads::UploadService;
