//! 提交组装 - 业务能力层
//!
//! 读取表单和上传队列，生成 `/generate_report` 的 multipart 载荷。
//! 校验失败时不产生任何载荷，也就不会发出请求。

use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::form::{field_label, BASIC_INFO_FIELDS, REQUIRED_FIELDS};
use crate::models::{Category, ReportForm, TemplateSelection};
use crate::services::upload_set::UploadSet;

/// 未填写课程名时的默认查询
const DEFAULT_QUERY: &str = "实训报告";

/// 提交前的校验错误（文本即用户看到的提示）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("请填写{label}")]
    MissingField { field: String, label: String },
    #[error("请上传封面模板或选择模板")]
    MissingCoverTemplate,
    #[error("请上传正文模板或选择模板")]
    MissingBodyTemplate,
    #[error("请上传至少一个资料文件")]
    MissingDataFiles,
}

/// 载荷中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

/// 按顺序排列的表单字段
#[derive(Debug, Clone, Default)]
pub struct SubmissionPayload {
    parts: Vec<(String, PartValue)>,
}

impl SubmissionPayload {
    fn text(&mut self, key: &str, value: impl Into<String>) {
        self.parts.push((key.to_string(), PartValue::Text(value.into())));
    }

    fn file(&mut self, key: &str, file_name: &str, mime: &'static str, bytes: &[u8]) {
        self.parts.push((
            key.to_string(),
            PartValue::File {
                file_name: file_name.to_string(),
                mime,
                bytes: bytes.to_vec(),
            },
        ));
    }

    pub fn parts(&self) -> &[(String, PartValue)] {
        &self.parts
    }

    /// 字段名列表（按顺序，可重复）
    pub fn keys(&self) -> Vec<&str> {
        self.parts.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// 第一个同名文本字段
    pub fn text_value(&self, key: &str) -> Option<&str> {
        self.parts.iter().find_map(|(k, v)| match v {
            PartValue::Text(text) if k == key => Some(text.as_str()),
            _ => None,
        })
    }

    /// 同名文件字段的文件名（按顺序）
    pub fn file_names(&self, key: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|(k, v)| match v {
                PartValue::File { file_name, .. } if k == key => Some(file_name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 转换为 reqwest 的 multipart 表单
    pub fn into_form(self) -> AppResult<Form> {
        let mut form = Form::new();
        for (key, value) in self.parts {
            form = match value {
                PartValue::Text(text) => form.text(key, text),
                PartValue::File {
                    file_name,
                    mime,
                    bytes,
                } => {
                    let part = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(mime)
                        .map_err(|e| AppError::Other(format!("无效的文件类型 {}: {}", mime, e)))?;
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}

/// 提交组装器
pub struct SubmissionAssembler;

impl SubmissionAssembler {
    /// 校验并组装载荷
    ///
    /// 选择了模板时提交模板路径，不再附带封面/正文文件
    pub fn assemble(
        form: &ReportForm,
        uploads: &UploadSet,
        template: Option<&TemplateSelection>,
    ) -> Result<SubmissionPayload, ValidationError> {
        Self::validate(form, uploads, template)?;

        let mut payload = SubmissionPayload::default();

        let project_name = form.field("project_name");
        payload.text(
            "query",
            if project_name.is_empty() {
                DEFAULT_QUERY
            } else {
                project_name
            },
        );

        for key in BASIC_INFO_FIELDS {
            let value = form.field(key);
            if !value.is_empty() {
                payload.text(key, value);
            }
        }

        payload.text("generation_mode", form.generation_mode.as_str());

        if let Some(pages) = form.final_target_pages() {
            payload.text("target_pages", pages);
        }

        payload.text(
            "multi_round_completion",
            if form.multi_round_completion { "true" } else { "false" },
        );

        if let Some(requirements) = form.effective_additional_requirements() {
            payload.text("additional_requirements", requirements);
        }

        match template {
            Some(selected) => {
                payload.text("cover_template_path", &selected.cover_template_path);
                payload.text("body_template_path", &selected.body_template_path);
                payload.text("template_id", selected.template_id.to_string());
            }
            None => {
                for category in [Category::Cover, Category::Body] {
                    for entry in uploads.entries(category) {
                        payload.file(category.form_field(), &entry.name, entry.mime, &entry.content);
                    }
                }
            }
        }

        for entry in uploads.entries(Category::Data) {
            payload.file(Category::Data.form_field(), &entry.name, entry.mime, &entry.content);
        }

        let order: Vec<&str> = uploads.order(Category::Data).collect();
        // 序列化 Vec<&str> 不会失败
        let file_order = serde_json::to_string(&order).unwrap_or_else(|_| "[]".to_string());
        payload.text("file_order", file_order);

        debug!("FormData 字段: {:?}", payload.keys());
        Ok(payload)
    }

    /// 校验顺序：必填字段 → 模板（未选模板时）→ 资料文件
    pub fn validate(
        form: &ReportForm,
        uploads: &UploadSet,
        template: Option<&TemplateSelection>,
    ) -> Result<(), ValidationError> {
        for field in REQUIRED_FIELDS {
            if form.field(field).is_empty() {
                return Err(ValidationError::MissingField {
                    field: field.to_string(),
                    label: field_label(field).to_string(),
                });
            }
        }

        if template.is_none() {
            if uploads.is_empty(Category::Cover) {
                return Err(ValidationError::MissingCoverTemplate);
            }
            if uploads.is_empty(Category::Body) {
                return Err(ValidationError::MissingBodyTemplate);
            }
        }

        if uploads.is_empty(Category::Data) {
            return Err(ValidationError::MissingDataFiles);
        }

        Ok(())
    }
}
