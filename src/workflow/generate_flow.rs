//! 报告生成流程 - 流程层
//!
//! 流程顺序：
//! 1. 显示进度条并启动模拟定时器
//! 2. 提交 `/generate_report`
//! 3. 停止定时器 → 进度置 100
//! 4. 渲染报告正文

use std::time::Duration;

use tracing::{info, warn};

use crate::clients::ReportApiClient;
use crate::error::AppResult;
use crate::models::ReportImage;
use crate::services::{ReportRenderer, SubmissionPayload};
use crate::workflow::progress::ProgressBar;

/// 一次成功生成的结果
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// 渲染后的正文；后端未返回正文时为 None
    pub html: Option<String>,
    pub download_url: String,
    pub images: Vec<ReportImage>,
}

/// 报告生成流程
///
/// - 不持有任何资源，只借用客户端和渲染器
/// - 不做校验（载荷已经过校验）
/// - 不处理按钮状态
pub struct GenerateFlow<'a> {
    client: &'a ReportApiClient,
    renderer: &'a ReportRenderer,
    tick: Duration,
}

impl<'a> GenerateFlow<'a> {
    pub fn new(client: &'a ReportApiClient, renderer: &'a ReportRenderer, tick: Duration) -> Self {
        Self {
            client,
            renderer,
            tick,
        }
    }

    pub async fn run(
        &self,
        payload: SubmissionPayload,
        progress: &mut ProgressBar,
    ) -> AppResult<GeneratedReport> {
        progress.show();
        let ticker = progress.start_ticker(self.tick);

        info!("📤 正在提交报告生成任务...");
        let result = self.client.generate_report(payload).await;

        ticker.stop().await;
        progress.set(100.0);

        let response = match result {
            Ok(response) => response,
            Err(e) if e.is_network() => {
                warn!("⚠️ 网络请求失败，未收到后端响应: {}", e);
                return Err(e);
            }
            Err(e) => {
                warn!("⚠️ 报告生成失败: {}", e);
                return Err(e);
            }
        };

        info!(
            "✓ 报告生成完成，插图 {} 张，下载地址: {}",
            response.images.len(),
            response.download_url
        );

        let html = response
            .report
            .as_deref()
            .filter(|report| !report.is_empty())
            .map(|report| self.renderer.render(report, &response.images));

        Ok(GeneratedReport {
            html,
            download_url: response.download_url,
            images: response.images,
        })
    }
}
