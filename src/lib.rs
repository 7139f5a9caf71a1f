//! # Report Page
//!
//! 实训报告生成页面的无界面控制器
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `HttpExecutor` - 唯一的 HTTP client owner，提供 GET / multipart POST
//! - `ListContainer` - 内存中的列表容器与元素
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `UploadSet` / `UploadPanel` - 上传队列，渲染与拖拽绑定是同一个操作
//! - `DragReorderController` - 拖拽排序状态机
//! - `SubmissionAssembler` - 校验并组装 FormData
//! - `ReportRenderer` - 插图占位符替换 + 简易 Markdown 转换
//! - `SessionContext` / `SubmitControl` - 会话与提交按钮
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次生成"的完整流程
//! - `GenerateFlow` - 进度条 → 提交 → 停止进度 → 渲染
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/report_page` - 页面控制器，持有全部页面状态
//! - `orchestrator/app` - 按任务文件驱动页面
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ReportApiClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Category, EntryId, ReportForm, SelectedFile};
pub use orchestrator::{App, GenerateOutcome, ReportPage};
pub use services::{DragEvent, DragOutcome, UploadPanel};
