/// 从 multipart 表单中读取到的文件
#[derive(Debug, Clone, Default)]
pub struct IncomingFile {
    /// 客户端提供的文件名（不可信）
    pub file_name: Option<String>,
    /// 客户端声明的 Content-Type（不可信）
    pub content_type: Option<String>,
    /// 文件内容；超过上限时只保留上限 + 1 字节
    pub data: Vec<u8>,
}

impl IncomingFile {
    pub fn new(
        file_name: Option<&str>,
        content_type: Option<&str>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.map(str::to_string),
            content_type: content_type.map(str::to_string),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
