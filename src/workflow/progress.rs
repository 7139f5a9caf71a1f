//! 模拟进度条
//!
//! 进度与真实上传无关，只是本地定时器递增的百分比，上限 90。
//! 收到响应后先停止定时器，再把进度置为 100。

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// 定时器推进的上限
pub const PROGRESS_CAP: f64 = 90.0;

/// 每次推进的随机步长上限（不含）
pub const PROGRESS_MAX_STEP: f64 = 10.0;

/// 定时器最短间隔，`interval` 不接受零
const MIN_TICK: Duration = Duration::from_millis(1);

/// 进度条显示状态
#[derive(Debug)]
pub struct ProgressBar {
    visible: bool,
    percent: Arc<watch::Sender<f64>>,
}

impl Default for ProgressBar {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self {
            visible: false,
            percent: Arc::new(tx),
        }
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 显示并归零
    pub fn show(&mut self) {
        self.visible = true;
        self.percent.send_replace(0.0);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn set(&self, percent: f64) {
        self.percent.send_replace(percent.clamp(0.0, 100.0));
    }

    pub fn percent(&self) -> f64 {
        *self.percent.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// 启动模拟定时器，间隔至少 1 毫秒
    pub fn start_ticker(&self, tick: Duration) -> ProgressTicker {
        let tick = tick.max(MIN_TICK);
        let percent = Arc::clone(&self.percent);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // 第一次 tick 立即返回
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        let step = rand::rng().random_range(0.0..PROGRESS_MAX_STEP);
                        let current = *percent.borrow();
                        percent.send_replace((current + step).min(PROGRESS_CAP));
                    }
                }
            }
        });

        ProgressTicker {
            stop: Some(stop_tx),
            handle,
        }
    }
}

/// 运行中的定时器
#[derive(Debug)]
pub struct ProgressTicker {
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// 停止并等待定时器退出，返回后进度不会再被修改
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        match (&mut self.handle).await {
            Ok(()) => debug!("进度定时器已停止"),
            Err(e) if e.is_cancelled() => {}
            Err(e) => error!("❌ 进度定时器异常退出: {}", e),
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
