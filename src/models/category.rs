use std::fmt;

/// 文档类格式（封面/正文模板只接受这些）
static DOCUMENT_EXTENSIONS: phf::Set<&'static str> = phf::phf_set! {
    "doc", "docx",
};

/// 资料文件允许的格式
static DATA_EXTENSIONS: phf::Set<&'static str> = phf::phf_set! {
    "md", "markdown", "doc", "docx", "pdf", "jpg", "jpeg", "png", "gif", "bmp",
};

/// 上传分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 封面模板
    Cover,
    /// 正文模板
    Body,
    /// 资料文件（顺序即报告组装顺序）
    Data,
}

impl Category {
    /// 全部分类
    pub const ALL: [Category; 3] = [Category::Cover, Category::Body, Category::Data];

    /// 分类标识
    pub fn key(self) -> &'static str {
        match self {
            Category::Cover => "cover",
            Category::Body => "body",
            Category::Data => "data",
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Category::Cover => "封面模板",
            Category::Body => "正文模板",
            Category::Data => "资料文件",
        }
    }

    /// 页面上的列表容器 ID
    pub fn list_id(self) -> &'static str {
        match self {
            Category::Cover => "coverUploaded",
            Category::Body => "bodyUploaded",
            Category::Data => "dataUploaded",
        }
    }

    /// 提交时的表单字段名
    pub fn form_field(self) -> &'static str {
        match self {
            Category::Cover => "cover_template",
            Category::Body => "body_template",
            Category::Data => "data_files",
        }
    }

    /// 是否支持拖拽排序
    pub fn is_reorderable(self) -> bool {
        matches!(self, Category::Data)
    }

    /// 判断扩展名（不含点，大小写不敏感）是否允许
    pub fn allows_extension(self, extension: &str) -> bool {
        let ext = extension.to_ascii_lowercase();
        match self {
            Category::Cover | Category::Body => DOCUMENT_EXTENSIONS.contains(ext.as_str()),
            Category::Data => DATA_EXTENSIONS.contains(ext.as_str()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
