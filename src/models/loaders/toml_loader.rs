use crate::models::form::ReportForm;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 一次拖拽排序（资料文件列表中的位置，从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DragMove {
    pub from: usize,
    pub to: usize,
}

/// 各分类待上传的文件路径
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobFiles {
    pub cover: Vec<PathBuf>,
    pub body: Vec<PathBuf>,
    pub data: Vec<PathBuf>,
}

/// 报告任务：一次页面操作所需的全部输入
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportJob {
    pub form: ReportForm,
    pub files: JobFiles,
    /// 使用服务器端模板代替上传封面/正文
    pub template_id: Option<i64>,
    /// 依次回放的拖拽排序
    pub moves: Vec<DragMove>,
    #[serde(skip)]
    pub file_path: Option<String>,
}

impl ReportJob {
    /// 相对路径以任务文件所在目录为基准
    fn resolve_paths(&mut self, base: &Path) {
        for path in self
            .files
            .cover
            .iter_mut()
            .chain(self.files.body.iter_mut())
            .chain(self.files.data.iter_mut())
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// 从 TOML 文件加载报告任务
pub async fn load_report_job(toml_file_path: &Path) -> Result<ReportJob> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut job = parse_report_job(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    if let Some(base) = toml_file_path.parent() {
        job.resolve_paths(base);
    }
    job.file_path = Some(toml_file_path.to_string_lossy().to_string());

    tracing::info!(
        "成功加载任务: 封面 {} 个, 正文 {} 个, 资料 {} 个",
        job.files.cover.len(),
        job.files.body.len(),
        job.files.data.len()
    );

    Ok(job)
}

/// 解析 TOML 文本
pub fn parse_report_job(content: &str) -> Result<ReportJob> {
    let job: ReportJob = toml::from_str(content)?;
    Ok(job)
}
