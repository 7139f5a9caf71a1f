use std::fmt;
use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult, FileError};

/// 队列中文件的稳定标识（加入时生成）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 用户选择（或拖入）的原始文件
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// 从磁盘读取文件
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            }));
        }

        let content = fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { name, content })
    }

    /// 扩展名（最后一个点之后，小写）；没有点则为 None
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// 上传队列中的文件
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub id: EntryId,
    pub name: String,
    pub content: Vec<u8>,
    pub size: u64,
    pub extension: String,
    pub mime: &'static str,
}

impl FileEntry {
    pub(crate) fn from_selected(id: EntryId, file: SelectedFile, extension: String) -> Self {
        let size = file.size();
        let mime = mime_for_extension(&extension);
        Self {
            id,
            name: file.name,
            content: file.content,
            size,
            extension,
            mime,
        }
    }
}

/// 取文件名中最后一个点之后的部分并转为小写
pub fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// 根据扩展名推断 MIME 类型
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "pdf" => "application/pdf",
        "md" | "markdown" => "text/markdown",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
