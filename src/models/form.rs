use serde::{Deserialize, Serialize};

/// 必填字段（按校验顺序）
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "student_id", "class_name", "project_name"];

/// 基本信息字段（按提交顺序，非空才提交）
pub const BASIC_INFO_FIELDS: [&str; 12] = [
    "name",
    "student_id",
    "class_name",
    "project_name",
    "instructor",
    "textbook",
    "lab",
    "finish_date",
    "design_requirements",
    "knowledge_and_tech",
    "completion",
    "self_statement",
];

/// 字段显示名
static FIELD_LABELS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "name" => "姓名",
    "student_id" => "学号",
    "class_name" => "班级",
    "project_name" => "课程",
};

/// 获取字段标签（未登记的字段直接使用字段名）
pub fn field_label(field: &str) -> &str {
    FIELD_LABELS.get(field).copied().unwrap_or(field)
}

/// 生成模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// 融合所有资料生成
    #[default]
    Fusion,
    /// 按资料顺序分别生成
    Separate,
}

impl GenerationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Fusion => "fusion",
            GenerationMode::Separate => "separate",
        }
    }
}

/// 报告表单
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportForm {
    pub name: String,
    pub student_id: String,
    pub class_name: String,
    pub project_name: String,
    pub instructor: String,
    pub textbook: String,
    pub lab: String,
    pub finish_date: String,
    pub design_requirements: String,
    pub knowledge_and_tech: String,
    pub completion: String,
    pub self_statement: String,

    pub generation_mode: GenerationMode,
    /// 页数下拉框
    pub target_pages: String,
    /// 自定义页数输入（优先于下拉框）
    pub target_pages_input: String,
    pub multi_round_completion: bool,
    /// 勾选后才提交附加要求
    pub advanced_formatting: bool,
    pub additional_requirements: String,
}

impl ReportForm {
    /// 按字段名读取（已去除首尾空白）
    pub fn field(&self, key: &str) -> &str {
        let value = match key {
            "name" => &self.name,
            "student_id" => &self.student_id,
            "class_name" => &self.class_name,
            "project_name" => &self.project_name,
            "instructor" => &self.instructor,
            "textbook" => &self.textbook,
            "lab" => &self.lab,
            "finish_date" => &self.finish_date,
            "design_requirements" => &self.design_requirements,
            "knowledge_and_tech" => &self.knowledge_and_tech,
            "completion" => &self.completion,
            "self_statement" => &self.self_statement,
            _ => "",
        };
        value.trim()
    }

    /// 最终页数目标：自定义输入优先
    pub fn final_target_pages(&self) -> Option<&str> {
        [self.target_pages_input.trim(), self.target_pages.trim()]
            .into_iter()
            .find(|v| !v.is_empty())
    }

    /// 附加要求（仅在勾选高级格式且非空时有效）
    pub fn effective_additional_requirements(&self) -> Option<&str> {
        if !self.advanced_formatting {
            return None;
        }
        Some(self.additional_requirements.trim()).filter(|v| !v.is_empty())
    }
}

/// 已选中的服务器端模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSelection {
    pub template_id: i64,
    pub cover_template_path: String,
    pub body_template_path: String,
}
