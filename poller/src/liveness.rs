//! ライブネスリスナー
//!
//! 固定ポートで全パスに 404 を返すだけのHTTPサーバー。
//! bind/serve が戻るたびに 1 秒待って再起動する。エラーは記録しない。
//! 稼働中の serve はシャットダウンで止めず、再起動を止めるだけ。

use std::{io, time::Duration};

use axum::{http::StatusCode, Router};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::shutdown::ShutdownController;

/// デフォルトの待ち受けアドレス
pub const DEFAULT_LIVENESS_ADDR: &str = "0.0.0.0:48081";

/// 再起動までの待機時間
pub const RESTART_DELAY: Duration = Duration::from_secs(1);

/// 404 レスポンスの本文
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Self-restarting "not found" listener
#[derive(Debug, Clone)]
pub struct LivenessListener {
    addr: String,
    restart_delay: Duration,
}

impl Default for LivenessListener {
    fn default() -> Self {
        Self::new(DEFAULT_LIVENESS_ADDR)
    }
}

impl LivenessListener {
    /// Listener bound to `addr` once started
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            restart_delay: RESTART_DELAY,
        }
    }

    /// 再起動間隔を設定
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Bind address
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Router answering 404 to every method and path
    pub fn router() -> Router {
        Router::new().fallback(|| async { (StatusCode::NOT_FOUND, NOT_FOUND_BODY) })
    }

    /// Bind and serve until the listener fails
    pub async fn serve_once(&self) -> io::Result<()> {
        let listener = TcpListener::bind(&self.addr).await?;
        axum::serve(listener, Self::router()).await
    }

    /// Restart loop; exits once shutdown is requested between attempts
    pub async fn run(&self, shutdown: &ShutdownController) {
        while !shutdown.is_shutdown_requested() {
            tokio::time::sleep(self.restart_delay).await;
            let _ = self.serve_once().await;
        }
    }

    /// Run the restart loop as a background task
    ///
    /// The returned handle does not need to be awaited; the task is dropped
    /// with the runtime.
    pub fn spawn(self, shutdown: ShutdownController) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(&shutdown).await })
    }
}
