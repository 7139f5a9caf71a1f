//! 报告页面控制器 - 编排层
//!
//! ## 职责
//!
//! 持有页面的全部状态，是唯一响应用户操作的入口。
//!
//! ## 核心功能
//!
//! 1. **会话**：启动时拉取用户信息，据此控制提交按钮
//! 2. **上传**：选择/删除文件、拖拽调整资料顺序
//! 3. **模板**：选择服务器端模板代替上传
//! 4. **提交**：校验 → 禁用按钮 → 生成 → 渲染预览 → 恢复按钮（任何结果都恢复）
//! 5. **预览**：插图描述编辑与保存
//! 6. **消息**：管理员用户列表、给管理员发消息
//!
//! 所有状态只在用户事件中修改，不存在并发访问

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::clients::ReportApiClient;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{Category, EntryId, ReportForm, SelectedFile, TemplateSelection, UserRecord};
use crate::services::{
    DragEvent, DragOutcome, ImageDescriptionEditor, MessageService, ReportRenderer,
    SessionContext, StatusBoard, SubmissionAssembler, SubmitControl, UploadPanel,
    ValidationError,
};
use crate::workflow::{GenerateFlow, GeneratedReport, ProgressBar};

const MSG_GENERATED: &str = "报告生成成功！";
const MSG_GENERATE_FAILED: &str = "报告生成失败";
const MSG_NETWORK: &str = "网络错误，请稍后重试";

/// 报告预览区
#[derive(Debug, Clone)]
pub struct ReportPreview {
    pub html: Option<String>,
    pub download_url: String,
    pub images: ImageDescriptionEditor,
}

/// 一次点击"生成报告"的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// 成功并已更新预览
    Generated,
    /// 校验未通过，没有发出请求
    Invalid(ValidationError),
    /// 按钮处于禁用状态
    Blocked,
    /// 请求失败，附带显示给用户的提示
    Failed(String),
}

/// 报告页面
pub struct ReportPage {
    config: Config,
    client: ReportApiClient,
    renderer: ReportRenderer,
    session: SessionContext,
    form: ReportForm,
    panel: UploadPanel,
    template: Option<TemplateSelection>,
    status: StatusBoard,
    submit: SubmitControl,
    progress: ProgressBar,
    preview: Option<ReportPreview>,
}

impl ReportPage {
    /// 创建页面（尚未拉取会话）
    pub fn new(config: Config) -> AppResult<Self> {
        let client = ReportApiClient::new(&config)?;
        let renderer = ReportRenderer::new(config.image_base_url.clone())?;
        let panel = UploadPanel::new(config.max_file_size);
        let status = StatusBoard::new(Duration::from_millis(config.error_ttl_ms));

        Ok(Self {
            config,
            client,
            renderer,
            session: SessionContext::fallback(),
            form: ReportForm::default(),
            panel,
            template: None,
            status,
            submit: SubmitControl::default(),
            progress: ProgressBar::new(),
            preview: None,
        })
    }

    /// 页面加载：拉取会话并刷新按钮
    pub async fn bootstrap(&mut self) {
        self.refresh_session().await;
        info!(
            "✓ 页面就绪 (用户: {}, 剩余次数: {})",
            self.session.username.as_deref().unwrap_or("--"),
            self.session.usage_display()
        );
    }

    /// 重新拉取用户信息
    pub async fn refresh_session(&mut self) {
        self.session = SessionContext::load(&self.client).await;
        self.submit.apply_session(&self.session);
    }

    // ========== 表单与上传 ==========

    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ReportForm {
        &mut self.form
    }

    /// 选择或拖入文件
    pub fn add_files(&mut self, category: Category, files: Vec<SelectedFile>) -> Vec<EntryId> {
        self.panel.add_files(category, files, &mut self.status)
    }

    /// 从磁盘读取文件后加入；读取失败的文件逐个提示
    pub async fn add_paths(&mut self, category: Category, paths: &[PathBuf]) -> Vec<EntryId> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match SelectedFile::from_path(path).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("⚠️ {}", e);
                    self.status
                        .show_error(format!("读取文件失败: {}", path.display()));
                }
            }
        }
        self.add_files(category, files)
    }

    pub fn remove_file(&mut self, category: Category, name: &str) -> usize {
        self.panel.remove_file(category, name)
    }

    pub fn dispatch_drag(&mut self, category: Category, event: DragEvent) -> DragOutcome {
        self.panel.dispatch_drag(category, event)
    }

    // ========== 模板 ==========

    /// 使用服务器端模板
    pub async fn use_template(&mut self, template_id: i64) -> bool {
        match self.client.template_files(template_id).await {
            Ok(selection) => {
                info!("✓ 已选择模板 {}", template_id);
                self.template = Some(selection);
                self.status.show_success("模板已应用！");
                true
            }
            Err(AppError::Api(ApiError::IncompleteResponse { .. })) => {
                self.status.show_error("模板信息不完整，请稍后重试");
                false
            }
            Err(e) => {
                warn!("⚠️ 使用模板失败: {}", e);
                self.status.show_error("使用模板失败，请稍后重试");
                false
            }
        }
    }

    /// 取消模板，回到上传文件模式
    pub fn clear_template(&mut self) {
        self.template = None;
    }

    // ========== 提交 ==========

    /// 点击"生成报告"
    pub async fn generate(&mut self) -> GenerateOutcome {
        if self.submit.is_disabled() {
            warn!("⚠️ 提交按钮不可用，忽略本次点击");
            return GenerateOutcome::Blocked;
        }

        let payload = match SubmissionAssembler::assemble(
            &self.form,
            self.panel.uploads(),
            self.template.as_ref(),
        ) {
            Ok(payload) => payload,
            Err(e) => {
                self.status.show_error(e.to_string());
                return GenerateOutcome::Invalid(e);
            }
        };

        // 从这里开始，任何结果都要走到下面的恢复步骤
        self.submit.begin();
        let tick = Duration::from_millis(self.config.progress_tick_ms);
        let flow = GenerateFlow::new(&self.client, &self.renderer, tick);
        let result = flow.run(payload, &mut self.progress).await;

        let outcome = match result {
            Ok(report) => {
                self.status.show_success(MSG_GENERATED);
                self.preview = Some(self.build_preview(report));
                GenerateOutcome::Generated
            }
            Err(e) => {
                let message = failure_message(&e);
                self.status.show_error(message.clone());
                GenerateOutcome::Failed(message)
            }
        };

        self.submit.finish();
        self.progress.hide();
        self.refresh_session().await;
        outcome
    }

    fn build_preview(&self, report: GeneratedReport) -> ReportPreview {
        ReportPreview {
            images: ImageDescriptionEditor::new(&report.images, &self.renderer),
            html: report.html,
            download_url: report.download_url,
        }
    }

    // ========== 预览 ==========

    pub fn set_image_description(&mut self, image_id: &str, description: &str) -> bool {
        match self.preview.as_mut() {
            Some(preview) => preview.images.set_description(image_id, description),
            None => false,
        }
    }

    /// 保存插图描述；没有预览时返回 None
    pub fn save_image_descriptions(&mut self) -> Option<BTreeMap<String, String>> {
        let preview = self.preview.as_ref()?;
        Some(preview.images.save(&mut self.status))
    }

    // ========== 消息中心 ==========

    pub async fn load_users_if_admin(&self) -> Vec<UserRecord> {
        MessageService::new(&self.client)
            .load_users_if_admin(&self.session)
            .await
    }

    pub async fn send_message_to_admin(&mut self, content: &str) -> bool {
        MessageService::new(&self.client)
            .send_to_admin(&self.session, content, &mut self.status)
            .await
    }

    // ========== 只读访问 ==========

    pub fn panel(&self) -> &UploadPanel {
        &self.panel
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    pub fn preview(&self) -> Option<&ReportPreview> {
        self.preview.as_ref()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn template(&self) -> Option<&TemplateSelection> {
        self.template.as_ref()
    }
}

/// 提交失败时给用户看的提示
fn failure_message(err: &AppError) -> String {
    match err {
        AppError::Api(api @ ApiError::BadResponse { .. }) => api
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| MSG_GENERATE_FAILED.to_string()),
        _ => MSG_NETWORK.to_string(),
    }
}
