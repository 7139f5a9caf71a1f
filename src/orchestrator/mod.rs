//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层持有页面的全部状态，响应用户操作并调度下层，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 按任务文件填写表单、加入文件、回放拖拽
//! - 把报告预览写入 HTML 文件
//!
//! ### `report_page` - 报告页面控制器
//! - 持有会话、表单、上传面板、提交按钮、进度条、预览
//! - 校验后提交，任何结果都恢复提交按钮
//! - 模板选择、插图描述、消息中心
//!
//! ## 层次关系
//!
//! ```text
//! app (处理一个任务文件)
//!     ↓
//! report_page (处理用户操作)
//!     ↓
//! workflow::GenerateFlow (进度条 + 提交 + 渲染)
//!     ↓
//! services (能力层：上传 / 拖拽 / 组装 / 渲染 / 会话)
//!     ↓
//! clients + infrastructure (HttpExecutor / ListContainer)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管任务，report_page 管页面状态
//! 2. **唯一所有者**：页面状态只由 report_page 修改
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure

pub mod app;
pub mod report_page;

// 重新导出主要类型
pub use app::App;
pub use report_page::{GenerateOutcome, ReportPage, ReportPreview};
