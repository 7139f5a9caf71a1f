//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 按任务文件驱动一次完整的页面操作，是二进制程序的唯一入口。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、启动信息、创建页面并拉取会话
//! 2. **填写表单**：从任务文件加载表单字段、模板、待上传文件
//! 3. **回放拖拽**：把任务中的排序步骤转成完整的拖拽手势
//! 4. **生成报告**：提交并把预览写入 HTML 文件
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 `ReportPage` 的模块
//! - **向下委托**：所有页面状态变化都经由 `ReportPage`

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{load_report_job, Category, DragMove, ReportJob};
use crate::orchestrator::report_page::{GenerateOutcome, ReportPage};
use crate::services::report_renderer::escape_html;
use crate::services::{DragEvent, DragOutcome};
use crate::utils::logging::{init_log_file, log_report_ready, log_startup};

/// 应用主结构
pub struct App {
    config: Config,
    page: ReportPage,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config.base_url);

        let mut page = ReportPage::new(config.clone()).context("创建报告页面失败")?;
        page.bootstrap().await;

        Ok(Self { config, page })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<()> {
        let job = load_report_job(Path::new(&self.config.job_file)).await?;
        info!(
            "📁 已加载任务: {}",
            job.file_path.as_deref().unwrap_or(&self.config.job_file)
        );

        self.fill_page(&job).await;
        self.replay_moves(&job.moves);

        match self.page.generate().await {
            GenerateOutcome::Generated => self.write_preview().await,
            GenerateOutcome::Invalid(e) => bail!("表单校验未通过: {}", e),
            GenerateOutcome::Blocked => bail!("提交按钮不可用: {}", self.page.submit_control().label()),
            GenerateOutcome::Failed(message) => bail!("报告生成失败: {}", message),
        }
    }

    /// 填写表单、选择模板、加入文件
    async fn fill_page(&mut self, job: &ReportJob) {
        *self.page.form_mut() = job.form.clone();

        if let Some(template_id) = job.template_id {
            if !self.page.use_template(template_id).await {
                warn!("⚠️ 模板 {} 不可用，改为上传文件", template_id);
            }
        }

        for (category, paths) in [
            (Category::Cover, &job.files.cover),
            (Category::Body, &job.files.body),
            (Category::Data, &job.files.data),
        ] {
            if paths.is_empty() {
                continue;
            }
            let added = self.page.add_paths(category, paths).await;
            info!("✓ {}: 已加入 {}/{} 个文件", category.name(), added.len(), paths.len());
        }
    }

    /// 把每一步排序回放成 开始 → 经过 → 放下 → 结束 的拖拽手势
    fn replay_moves(&mut self, moves: &[DragMove]) {
        for step in moves {
            let Some(list) = self.page.panel().list(Category::Data) else {
                return;
            };
            let (Some(source), Some(target)) = (list.element_at(step.from), list.element_at(step.to))
            else {
                warn!("⚠️ 忽略越界的排序步骤: {} → {}", step.from, step.to);
                continue;
            };
            let (source, target) = (source.id(), target.id());

            let mut reordered = false;
            for event in [
                DragEvent::Start(source),
                DragEvent::Over(target),
                DragEvent::Drop(target),
                DragEvent::End(source),
            ] {
                if let DragOutcome::Reorder { .. } = self.page.dispatch_drag(Category::Data, event) {
                    reordered = true;
                }
            }
            if !reordered {
                warn!("⚠️ 排序步骤未生效: {} → {}", step.from, step.to);
            }
        }
    }

    /// 把预览写入 HTML 文件
    async fn write_preview(&self) -> Result<()> {
        let Some(preview) = self.page.preview() else {
            bail!("报告已生成但没有预览");
        };

        let document = preview_document(
            preview.html.as_deref().unwrap_or_default(),
            &preview.download_url,
        );
        tokio::fs::write(&self.config.output_html, document)
            .await
            .with_context(|| format!("无法写入预览文件: {}", self.config.output_html))?;

        log_report_ready(
            &preview.download_url,
            preview.images.thumbs().len(),
            &self.config.output_html,
        );
        Ok(())
    }

    pub fn page(&self) -> &ReportPage {
        &self.page
    }
}

/// 拼装预览页面；正文已是渲染好的 HTML，下载地址需要转义
fn preview_document(body: &str, download_url: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>实训报告预览</title></head>\n<body>\n{}\n<p><a href=\"{}\">下载报告</a></p>\n</body>\n</html>\n",
        body,
        escape_html(download_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_document_escapes_download_url() {
        let html = preview_document("<h1>报告</h1>", r#"/download/a"b.docx?x=1&y=<2>"#);

        assert!(html.contains("<h1>报告</h1>"));
        assert!(html.contains(r#"href="/download/a&quot;b.docx?x=1&amp;y=&lt;2&gt;""#));
    }
}
