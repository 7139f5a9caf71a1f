//! 页面提示信息
//!
//! 错误提示会在一段时间后自动隐藏，成功提示一直保留到被替换。

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

/// 最多保留的历史提示条数
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    expires_at: Option<Instant>,
}

impl StatusMessage {
    fn is_visible_at(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// 提示栏
#[derive(Debug)]
pub struct StatusBoard {
    error_ttl: Duration,
    current: Option<StatusMessage>,
    history: Vec<StatusMessage>,
}

impl StatusBoard {
    pub fn new(error_ttl: Duration) -> Self {
        Self {
            error_ttl,
            current: None,
            history: Vec::new(),
        }
    }

    /// 显示错误提示（限时）
    pub fn show_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!("❌ {}", text);
        self.push(StatusMessage {
            kind: StatusKind::Error,
            text,
            expires_at: Some(Instant::now() + self.error_ttl),
        });
    }

    /// 显示成功提示
    pub fn show_success(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!("✓ {}", text);
        self.push(StatusMessage {
            kind: StatusKind::Success,
            text,
            expires_at: None,
        });
    }

    /// 当前可见的提示
    pub fn visible(&self) -> Option<&StatusMessage> {
        let now = Instant::now();
        self.current.as_ref().filter(|m| m.is_visible_at(now))
    }

    /// 最近显示过的提示（按时间顺序，最多 `HISTORY_LIMIT` 条）
    pub fn history(&self) -> &[StatusMessage] {
        &self.history
    }

    /// 最近一条提示的文本
    pub fn last_text(&self) -> Option<&str> {
        self.history.last().map(|m| m.text.as_str())
    }

    /// 显示过的错误提示文本
    pub fn errors(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter(|m| m.kind == StatusKind::Error)
            .map(|m| m.text.as_str())
            .collect()
    }

    fn push(&mut self, message: StatusMessage) {
        self.history.push(message.clone());
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
        self.current = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_error_hides_after_ttl() {
        let mut board = StatusBoard::new(Duration::from_millis(3000));
        board.show_error("请填写姓名");
        assert_eq!(board.visible().map(|m| m.text.as_str()), Some("请填写姓名"));

        tokio::time::advance(Duration::from_millis(3001)).await;
        assert!(board.visible().is_none());
        assert_eq!(board.errors(), vec!["请填写姓名"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_persists() {
        let mut board = StatusBoard::new(Duration::from_millis(10));
        board.show_success("报告生成成功！");
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(board.visible().map(|m| m.kind), Some(StatusKind::Success));
        assert_eq!(board.last_text(), Some("报告生成成功！"));
    }

    #[test]
    fn test_history_keeps_only_recent_messages() {
        let mut board = StatusBoard::new(Duration::from_millis(3000));
        for i in 0..HISTORY_LIMIT + 10 {
            board.show_error(format!("错误 {}", i));
        }

        assert_eq!(board.history().len(), HISTORY_LIMIT);
        assert_eq!(board.history()[0].text, "错误 10");
        assert_eq!(board.last_text(), Some("错误 59"));
    }
}
