/// 报告后端 API 客户端
///
/// 封装所有与报告后端相关的调用，一个方法对应一个接口
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::HttpExecutor;
use crate::models::report::AdminIdResponse;
use crate::models::{
    GenerateReportResponse, SendMessageResponse, TemplateFiles, TemplateSelection, UserProfile,
    UserRecord,
};
use crate::services::submission::SubmissionPayload;
use reqwest::multipart::Form;
use tracing::debug;

/// 报告后端客户端
pub struct ReportApiClient {
    executor: HttpExecutor,
}

impl ReportApiClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            executor: HttpExecutor::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// 提交报告生成任务
    ///
    /// # 参数
    /// - `payload`: 组装好的表单载荷
    ///
    /// # 返回
    /// 返回报告正文、插图列表和下载地址
    pub async fn generate_report(
        &self,
        payload: SubmissionPayload,
    ) -> AppResult<GenerateReportResponse> {
        debug!("提交报告 FormData 字段数: {}", payload.parts().len());
        let form = payload.into_form()?;
        self.executor.post_multipart("/generate_report", form).await
    }

    /// 获取当前用户信息
    pub async fn user_profile(&self) -> AppResult<UserProfile> {
        self.executor.get_json("/user/profile").await
    }

    /// 获取管理员 ID
    pub async fn admin_id(&self) -> AppResult<i64> {
        let response: AdminIdResponse = self.executor.get_json("/user/admin_id").await?;
        Ok(response.admin_id)
    }

    /// 获取全部用户（仅管理员）
    pub async fn admin_users(&self) -> AppResult<Vec<UserRecord>> {
        self.executor.get_json("/admin/users").await
    }

    /// 获取模板文件路径
    ///
    /// 封面和正文路径缺一不可
    pub async fn template_files(&self, template_id: i64) -> AppResult<TemplateSelection> {
        let endpoint = format!("/templates/{}/files", template_id);
        let files: TemplateFiles = self.executor.get_json(&endpoint).await?;

        let incomplete = |field: &str| {
            AppError::Api(ApiError::IncompleteResponse {
                endpoint: endpoint.clone(),
                field: field.to_string(),
            })
        };

        let cover_template_path = files
            .cover_template_path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| incomplete("cover_template_path"))?;
        let body_template_path = files
            .body_template_path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| incomplete("body_template_path"))?;

        Ok(TemplateSelection {
            template_id,
            cover_template_path,
            body_template_path,
        })
    }

    /// 发送站内消息
    pub async fn send_message(&self, to_user_id: i64, content: &str) -> AppResult<SendMessageResponse> {
        let form = Form::new()
            .text("to_user_id", to_user_id.to_string())
            .text("content", content.to_string());
        self.executor.post_multipart("/messages/send", form).await
    }
}
