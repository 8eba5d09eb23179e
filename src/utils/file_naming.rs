//! 上传文件命名工具
//!
//! 扩展名解析、MIME 推断、存储文件名生成和公开 URL 构造。
//! 扩展名只用于命名和猜测类型，从不用于执行。

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use uuid::Uuid;

/// 无法得到扩展名时使用的通用二进制扩展名
pub const FALLBACK_EXTENSION: &str = "bin";

/// 无法得到类型时使用的通用 MIME
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

const MAX_EXTENSION_LEN: usize = 16;

static REPEATED_SLASHES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("Invalid slash regex"));

/// 常见图片类型的首选扩展名，其余交给 mime_guess
fn preferred_extension(essence: &str) -> Option<&'static str> {
    match essence {
        "image/jpeg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        "image/svg+xml" => Some("svg"),
        "image/bmp" => Some("bmp"),
        "image/tiff" => Some("tiff"),
        "image/x-icon" | "image/vnd.microsoft.icon" => Some("ico"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

fn is_usable_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= MAX_EXTENSION_LEN && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

/// 从文件名后缀提取扩展名
fn extension_from_name(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| is_usable_extension(ext))
        .map(str::to_ascii_lowercase)
}

/// 从 MIME 类型推断扩展名
fn extension_from_mime(mime_type: &str) -> Option<String> {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence.is_empty() || essence == FALLBACK_MIME_TYPE {
        return None;
    }

    if let Some(ext) = preferred_extension(&essence) {
        return Some(ext.to_string());
    }

    mime_guess::get_mime_extensions_str(&essence)
        .and_then(|exts| exts.first())
        .filter(|ext| is_usable_extension(ext))
        .map(|ext| ext.to_ascii_lowercase())
}

/// 解析扩展名：文件名后缀 → MIME 推断 → `bin`，结果统一小写
pub fn resolve_extension(file_name: &str, mime_type: &str) -> String {
    extension_from_name(file_name)
        .or_else(|| extension_from_mime(mime_type))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// 解析记录中的 MIME：客户端声明 → 按扩展名猜测 → octet-stream
pub fn resolve_mime_type(declared: Option<&str>, extension: &str) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|d| !d.is_empty()) {
        return declared.to_string();
    }

    mime_guess::from_ext(extension)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}

/// 生成存储文件名：`{毫秒时间戳}-{uuid}.{扩展名}`
pub fn generate_stored_name(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        extension
    )
}

/// 把配置的上传目录规整为 URL 前缀
///
/// 去掉开头的 `/`、`./` 和 `public/` 段，去掉结尾的 `/`，再补一个前导 `/`。
/// `public/uploads`、`public/uploads/`、`/public/uploads` 都得到 `/uploads`；
/// 目录就是 `public` 时得到空串（文件直接挂在根路径下）。
pub fn public_dir_prefix(upload_dir: &str) -> String {
    let normalized = upload_dir.replace('\\', "/");
    let mut dir = normalized.trim_start_matches(['/', '.']);

    if dir == "public" {
        dir = "";
    } else if let Some(rest) = dir.strip_prefix("public/") {
        dir = rest;
    }

    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        String::new()
    } else {
        REPEATED_SLASHES_RE
            .replace_all(&format!("/{dir}"), "/")
            .into_owned()
    }
}

/// 构造公开访问 URL，保证以单个 `/` 开头且不含连续的 `/`
pub fn build_public_url(upload_dir: &str, file_name: &str) -> String {
    let url = format!("{}/{}", public_dir_prefix(upload_dir), file_name);
    REPEATED_SLASHES_RE.replace_all(&url, "/").into_owned()
}

/// 检查请求中的存储文件名是否安全（只允许单个路径段）
pub fn is_safe_stored_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.starts_with('.')
        && file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
