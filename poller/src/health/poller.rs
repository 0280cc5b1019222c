//! レート制限付きポーラー
//!
//! リミッターの許可を待ってから対象URLへGETを1回送り、結果をログに出す。
//! 許可待ちとリクエストはどちらも同期的に行うため、同時に複数のリクエストが
//! 飛ぶことはない（応答が遅ければ実効レートは設定値を下回る）。

use ratepoll_common::PollerConfig;
use reqwest::{header::CONNECTION, redirect, Client, Method, Url};
use thiserror::Error;
use tracing::{debug, info};

use super::outcome::{FailureKind, PollOutcome};
use crate::limiter::RateLimiter;
use crate::shutdown::ShutdownController;

/// Poller construction error
#[derive(Debug, Error)]
pub enum PollerError {
    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Rate-limited HTTP poller
///
/// Issues `GET target_url` at most `rps` times per second until shutdown.
#[derive(Debug, Clone)]
pub struct Poller {
    /// HTTPクライアント（キープアライブ無効、リダイレクト非追従）
    client: Client,
    /// ポーリング対象URL
    target_url: Url,
    /// 1秒あたりの最大リクエスト数
    rps: f64,
}

impl Poller {
    /// Create a poller from the startup configuration
    pub fn new(config: &PollerConfig) -> Result<Self, PollerError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            target_url: config.target_url.clone(),
            rps: config.rps,
        })
    }

    /// Poll until the limiter refuses permission, returning the attempt count
    ///
    /// The limiter only refuses once shutdown was requested (or, for a
    /// zero rate, after the first attempt).
    pub async fn run(&self, shutdown: &ShutdownController) -> u64 {
        let mut limiter = RateLimiter::new(self.rps);
        let mut attempts = 0u64;

        info!(url = %self.target_url, rps = self.rps, "Poll loop started");

        loop {
            if let Err(e) = limiter.wait(shutdown).await {
                debug!(error = %e, "Rate limiter refused permission");
                break;
            }

            let outcome = self.poll_once(shutdown).await;
            outcome.log();
            attempts += 1;
        }

        info!(attempts, "poller stopped");
        attempts
    }

    /// Issue a single GET and report what happened
    ///
    /// Never fails: transport errors come back as [`PollOutcome::Failed`],
    /// a failed body read as an empty body.
    pub async fn poll_once(&self, shutdown: &ShutdownController) -> PollOutcome {
        let request = self
            .client
            .get(self.target_url.clone())
            .header(CONNECTION, "close");

        let sent = tokio::select! {
            result = request.send() => result,
            _ = shutdown.wait() => {
                return self.failed(FailureKind::Cancelled, "request cancelled by shutdown".to_string());
            }
        };

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                let kind = if e.is_timeout() {
                    FailureKind::Timeout
                } else {
                    FailureKind::Transport
                };
                return self.failed(kind, e.to_string());
            }
        };

        let status = response.status();
        // レスポンスは bytes() で消費され、読み取り結果に関わらず解放される
        let body = tokio::select! {
            body = response.bytes() => body.map(|b| b.to_vec()).unwrap_or_default(),
            _ = shutdown.wait() => Vec::new(),
        };

        PollOutcome::Response {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    fn failed(&self, kind: FailureKind, error: String) -> PollOutcome {
        PollOutcome::Failed {
            method: Method::GET,
            url: self.target_url.clone(),
            kind,
            error,
        }
    }
}
