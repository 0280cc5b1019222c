//! Cooperative shutdown controller.
//!
//! The poll loop, the limiter and the liveness listener all observe the same
//! controller, so one interrupt stops the whole process.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::{sync::Notify, task::JoinHandle};
use tracing::{info, warn};

/// Cooperative shutdown signal used for graceful exit.
///
/// Once requested, shutdown stays requested for the life of the process.
#[derive(Clone, Debug, Default)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownController {
    /// Returns true if shutdown has been requested.
    pub fn is_shutdown_requested(&self) -> bool {
        self.inner.requested.load(Ordering::Acquire)
    }

    /// Request shutdown and wake all waiters.
    pub fn request_shutdown(&self) {
        self.inner.requested.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Wait until shutdown is requested.
    pub async fn wait(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // フラグ確認より先に待機登録しておく（通知の取りこぼし防止）
        notified.as_mut().enable();

        if self.is_shutdown_requested() {
            return;
        }
        notified.await;
    }
}

/// OSシグナル監視タスクのガード
///
/// Drop時に監視タスクを停止する。`main` がプロセス終了まで保持する。
#[derive(Debug)]
pub struct SignalGuard {
    handle: JoinHandle<()>,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Request shutdown on the controller when the process is interrupted.
///
/// Listens for Ctrl+C (SIGINT) and, on unix, SIGTERM.
pub fn install_signal_handler(shutdown: ShutdownController) -> SignalGuard {
    let handle = tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.request_shutdown();
    });
    SignalGuard { handle }
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
