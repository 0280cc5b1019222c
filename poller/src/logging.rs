//! ロギング初期化
//!
//! `RUST_LOG` が設定されていればそれを優先し、なければ `LOG_LEVEL`
//! （デフォルト: info）をフィルタとして使う。

use ratepoll_common::config::get_env_or;
use tracing_subscriber::EnvFilter;

/// ログレベルの環境変数名
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the log filter from the environment
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(get_env_or(ENV_LOG_LEVEL, DEFAULT_LOG_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the global fmt subscriber
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init()
}
