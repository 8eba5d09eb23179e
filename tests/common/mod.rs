#![allow(dead_code)]

use std::path::Path;

use loveymoji::config::UploadConfig;

pub const BOUNDARY: &str = "----loveymoji-test-boundary";

pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "file",
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn upload_config(root: &Path) -> UploadConfig {
    UploadConfig::with_dir(root.join("public").join("uploads").to_string_lossy())
}

/// 按 main.rs 的方式组装应用
#[macro_export]
macro_rules! init_app {
    ($storage:expr, $upload:expr) => {{
        let storage: std::sync::Arc<dyn loveymoji::storage::Storage> = $storage;
        let upload: loveymoji::config::UploadConfig = $upload;
        let prefix = upload.public_prefix();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(storage))
                .app_data(actix_web::web::Data::new(upload))
                .configure(loveymoji::routes::configure_upload_routes)
                .configure(loveymoji::routes::configure_frontend_routes)
                .configure(loveymoji::routes::configure_public_file_routes(prefix)),
        )
        .await
    }};
}
