//! 消息中心相关能力
//!
//! 只处理单条消息和用户列表，不关心页面流程

use tracing::{info, warn};

use crate::clients::ReportApiClient;
use crate::models::UserRecord;
use crate::services::session::SessionContext;
use crate::services::status_board::StatusBoard;
use crate::utils::truncate_text;

/// 消息服务
pub struct MessageService<'a> {
    client: &'a ReportApiClient,
}

impl<'a> MessageService<'a> {
    pub fn new(client: &'a ReportApiClient) -> Self {
        Self { client }
    }

    /// 管理员才请求用户列表，任何失败都返回空列表
    pub async fn load_users_if_admin(&self, session: &SessionContext) -> Vec<UserRecord> {
        if !session.is_admin {
            return Vec::new();
        }
        match self.client.admin_users().await {
            Ok(users) => {
                info!("✓ 加载用户列表: {} 个", users.len());
                users
            }
            Err(e) => {
                warn!("⚠️ 加载用户列表失败: {}", e);
                Vec::new()
            }
        }
    }

    /// 给管理员发消息，返回是否发送成功
    pub async fn send_to_admin(
        &self,
        session: &SessionContext,
        content: &str,
        status: &mut StatusBoard,
    ) -> bool {
        let Some(admin_id) = session.admin_id else {
            status.show_error("管理员ID未获取到，无法发送消息");
            return false;
        };

        match self.client.send_message(admin_id, content).await {
            Ok(response) if response.success => {
                info!(
                    "📤 消息已发送给管理员 {}: {}",
                    admin_id,
                    truncate_text(content, 30)
                );
                true
            }
            Ok(_) => {
                status.show_error("消息发送失败");
                false
            }
            Err(e) => {
                warn!("⚠️ 发送消息失败: {}", e);
                status.show_error("消息发送失败");
                false
            }
        }
    }
}
