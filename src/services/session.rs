//! 会话上下文
//!
//! 启动时拉取一次用户信息和管理员 ID。拉取失败不阻塞页面，
//! 按约定的兜底值处理：非管理员、使用次数显示为 `--`、提交按钮可用。

use tracing::{debug, warn};

use crate::clients::ReportApiClient;

/// 使用次数未知时的占位显示
pub const USAGE_PLACEHOLDER: &str = "--";

const ADMIN_USERNAME: &str = "admin";

/// 会话上下文
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// 用户信息是否拉取成功
    pub profile_loaded: bool,
    pub username: Option<String>,
    pub usage_count: Option<i64>,
    pub is_admin: bool,
    pub admin_id: Option<i64>,
}

impl SessionContext {
    /// 拉取失败时的兜底会话
    pub fn fallback() -> Self {
        Self::default()
    }

    /// 拉取用户信息和管理员 ID（两者并发，互不影响）
    pub async fn load(client: &ReportApiClient) -> Self {
        let (profile, admin_id) = futures::join!(client.user_profile(), client.admin_id());

        let mut session = match profile {
            Ok(profile) => {
                debug!("用户信息: {:?}", profile);
                let is_admin = profile.username.as_deref() == Some(ADMIN_USERNAME);
                Self {
                    profile_loaded: true,
                    username: profile.username,
                    usage_count: profile.usage_count,
                    is_admin,
                    admin_id: None,
                }
            }
            Err(e) => {
                warn!("⚠️ 获取用户信息失败，使用默认值: {}", e);
                Self::fallback()
            }
        };

        match admin_id {
            Ok(id) => session.admin_id = Some(id),
            Err(e) => warn!("⚠️ 获取管理员ID失败: {}", e),
        }

        session
    }

    /// 使用次数显示文本
    pub fn usage_display(&self) -> String {
        self.usage_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| USAGE_PLACEHOLDER.to_string())
    }

    /// 是否允许提交；用户信息未拉取到时放行
    pub fn can_submit(&self) -> bool {
        if !self.profile_loaded {
            return true;
        }
        matches!(self.usage_count, Some(count) if count > 0)
    }
}

const LABEL_READY: &str = "生成报告";
const LABEL_BUSY: &str = "生成中...";
const LABEL_EXHAUSTED: &str = "使用次数已用完，请充值";

/// 提交按钮状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    disabled: bool,
    busy: bool,
    label: &'static str,
    /// 是否带 `disabled` 样式类（仅次数用完时）
    exhausted: bool,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            disabled: false,
            busy: false,
            label: LABEL_READY,
            exhausted: false,
        }
    }
}

impl SubmitControl {
    /// 根据会话刷新按钮
    pub fn apply_session(&mut self, session: &SessionContext) {
        if self.busy {
            return;
        }
        if session.can_submit() {
            self.disabled = false;
            self.exhausted = false;
            self.label = LABEL_READY;
        } else {
            self.disabled = true;
            self.exhausted = true;
            self.label = LABEL_EXHAUSTED;
        }
    }

    /// 开始提交
    pub fn begin(&mut self) {
        self.busy = true;
        self.disabled = true;
        self.label = LABEL_BUSY;
    }

    /// 提交结束（无论成败）
    pub fn finish(&mut self) {
        self.busy = false;
        self.disabled = false;
        self.exhausted = false;
        self.label = LABEL_READY;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn has_disabled_class(&self) -> bool {
        self.exhausted
    }
}
