//! 前端页面路由
//!
//! 使用 rust-embed 嵌入前端资源，支持：
//! - 首页服务端渲染最近上传列表，并把初始数据交给前端脚本
//! - 自定义前端目录覆盖（开发用）
//! - `/assets/*` 静态资源

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;

use super::uploads::UPLOAD_SERVICE;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::uploads::entities::Upload;
use crate::services::uploads::list::recent_uploads_for_request;

/// 嵌入前端静态资源
/// 编译时从 frontend/dist/ 目录读取文件
#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

/// 检查是否应该设置缓存
fn should_cache(path: &str) -> bool {
    path.starts_with("assets/")
}

/// 尝试从自定义目录读取文件（开发用）
fn try_custom_file(path: &str) -> Option<Vec<u8>> {
    let custom_path = format!("./frontend-custom/{path}");
    std::fs::read(&custom_path).ok()
}

/// 尝试从嵌入的资源中获取文件
fn get_embedded_file(path: &str) -> Option<Vec<u8>> {
    FrontendAssets::get(path).map(|f| f.data.to_vec())
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
fn get_file(path: &str) -> Option<Vec<u8>> {
    try_custom_file(path).or_else(|| get_embedded_file(path))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 渲染单个上传卡片
fn render_upload_item(upload: &Upload) -> String {
    let name = escape_html(&upload.original_name);
    let url = escape_html(&upload.url);
    format!(
        r#"<li class="gallery-item"><a href="{url}" target="_blank" rel="noopener"><img src="{url}" alt="{name}" loading="lazy"></a><span class="gallery-name" title="{name}">{name}</span><time datetime="{created}">{created_short}</time></li>"#,
        created = upload.created_at.to_rfc3339(),
        created_short = upload.created_at.format("%Y-%m-%d %H:%M"),
    )
}

/// 服务端渲染的列表部分
async fn render_gallery_items(request: &HttpRequest) -> Result<String> {
    let uploads = recent_uploads_for_request(&UPLOAD_SERVICE, request).await?;
    if uploads.is_empty() {
        return Ok(r#"<li class="gallery-empty">No uploads yet.</li>"#.to_string());
    }
    Ok(uploads.iter().map(render_upload_item).collect())
}

/// 交给前端脚本的初始数据，`<` 转义后可直接放入 `<script>`
async fn render_initial_state(request: &HttpRequest) -> Result<String> {
    let uploads = recent_uploads_for_request(&UPLOAD_SERVICE, request).await?;
    Ok(serde_json::to_string(&uploads)?.replace('<', "\\u003c"))
}

/// 模板中的占位符
const SYSTEM_NAME_PLACEHOLDER: &str = "%SYSTEM_NAME%";
const GALLERY_ITEMS_PLACEHOLDER: &str = "%GALLERY_ITEMS%";
const INITIAL_UPLOADS_PLACEHOLDER: &str = "%INITIAL_UPLOADS%";

/// 一次扫描模板完成占位符替换
///
/// 只在模板原文中查找占位符，填入的内容不会再被扫描，
/// 所以文件名里出现的占位符文本会原样保留。
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(placeholder, value)| {
                rest.find(placeholder).map(|at| (at, *placeholder, *value))
            })
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, placeholder, value)) => {
                rendered.push_str(&rest[..at]);
                rendered.push_str(value);
                rest = &rest[at + placeholder.len()..];
            }
            None => {
                rendered.push_str(rest);
                return rendered;
            }
        }
    }
}

/// 渲染首页模板
async fn render_index(template: &[u8], request: &HttpRequest) -> Result<String> {
    let html = String::from_utf8_lossy(template);
    let system_name = request
        .app_data::<web::Data<AppConfig>>()
        .map(|config| config.app.system_name.clone())
        .unwrap_or_else(|| "Loveymoji".to_string());
    let system_name = escape_html(&system_name);

    let gallery_items = if html.contains(GALLERY_ITEMS_PLACEHOLDER) {
        render_gallery_items(request).await?
    } else {
        String::new()
    };
    let initial_uploads = if html.contains(INITIAL_UPLOADS_PLACEHOLDER) {
        render_initial_state(request).await?
    } else {
        String::new()
    };

    Ok(fill_placeholders(
        &html,
        &[
            (SYSTEM_NAME_PLACEHOLDER, system_name.as_str()),
            (GALLERY_ITEMS_PLACEHOLDER, gallery_items.as_str()),
            (INITIAL_UPLOADS_PLACEHOLDER, initial_uploads.as_str()),
        ],
    ))
}

/// 首页
pub async fn serve_index(request: HttpRequest) -> ActixResult<HttpResponse> {
    match get_file("index.html") {
        Some(template) => {
            let html = render_index(&template, &request).await?;
            Ok(HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                .body(html))
        }
        // 如果连 index.html 都没有，返回一个简单的提示
        None => Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Loveymoji</title>
</head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The frontend assets have not been embedded.</p>
</body>
</html>"#,
            )),
    }
}

/// 静态资源
pub async fn serve_asset(request: HttpRequest) -> ActixResult<HttpResponse> {
    let tail = request.match_info().query("tail").trim_start_matches('/');
    let path = format!("assets/{tail}");

    if tail.split('/').any(|segment| segment == "..") {
        return Ok(HttpResponse::NotFound().finish());
    }

    match get_file(&path) {
        Some(data) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            let mut response = HttpResponse::Ok();
            response.content_type(mime.essence_str());

            // 设置缓存头
            if should_cache(&path) {
                response.insert_header(("Cache-Control", "public, max-age=86400"));
            }

            Ok(response.body(data))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// 配置前端路由
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index))
        .route("/assets/{tail:.*}", web::get().to(serve_asset));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::uploads::entities::Upload;

    #[test]
    fn test_should_cache() {
        assert!(should_cache("assets/app.js"));
        assert!(!should_cache("index.html"));
    }

    #[test]
    fn test_fill_placeholders_does_not_rescan_values() {
        let rendered = fill_placeholders(
            "<h1>%A%</h1><ul>%B%</ul><script>%C%</script>%A%",
            &[("%A%", "Gallery"), ("%B%", "<li>%C%</li>"), ("%C%", "[1]")],
        );
        assert_eq!(
            rendered,
            "<h1>Gallery</h1><ul><li>%C%</li></ul><script>[1]</script>Gallery"
        );
    }

    #[test]
    fn test_fill_placeholders_without_placeholders() {
        assert_eq!(fill_placeholders("plain", &[("%A%", "x")]), "plain");
        assert_eq!(fill_placeholders("", &[("%A%", "x")]), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="alert('x')">&"#),
            "&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt;&amp;"
        );
    }

    #[test]
    fn test_render_upload_item_escapes_name() {
        let upload = Upload {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
            original_name: "<b>cat</b>.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 1,
            url: "/uploads/1-a.png".to_string(),
            created_at: chrono::DateTime::from_timestamp_millis(0).unwrap_or_default(),
        };

        let html = render_upload_item(&upload);
        assert!(html.contains(r#"src="/uploads/1-a.png""#));
        assert!(html.contains("&lt;b&gt;cat&lt;/b&gt;.png"));
        assert!(!html.contains("<b>"));
    }
}
