use serde::{Deserialize, Serialize};

/// 报告中的插图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportImage {
    pub id: String,
    pub filepath: String,
    #[serde(default)]
    pub description: String,
}

impl ReportImage {
    /// 正文中对应的占位符
    pub fn placeholder(&self) -> String {
        format!("{{{{image:{}}}}}", self.id)
    }
}

/// `/generate_report` 的成功响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateReportResponse {
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub images: Vec<ReportImage>,
    #[serde(default)]
    pub download_url: String,
}

/// 后端错误响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// `/user/profile`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub usage_count: Option<i64>,
}

/// `/user/admin_id`
#[derive(Debug, Clone, Deserialize)]
pub struct AdminIdResponse {
    pub admin_id: i64,
}

/// `/admin/users` 中的一条用户记录
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub usage_count: Option<i64>,
}

/// `/templates/:id/files`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFiles {
    #[serde(default)]
    pub cover_template_path: Option<String>,
    #[serde(default)]
    pub body_template_path: Option<String>,
}

/// `/messages/send`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub success: bool,
}
