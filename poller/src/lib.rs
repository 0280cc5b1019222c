//! ratepoll
//!
//! 設定されたURLをレート制限付きでポーリングし、応答をログに出す。
//! 補助としてポート 48081 で 404 を返すライブネスリスナーを動かす。

#![warn(missing_docs)]

/// CLIインターフェース
pub mod cli;

/// ヘルスポーリング（レート制限付きGETループ）
pub mod health;

/// トークンバケット方式のレートリミッター
pub mod limiter;

/// ライブネスリスナー
pub mod liveness;

/// ロギング初期化ユーティリティ
pub mod logging;

/// シャットダウンコントローラー
pub mod shutdown;

pub use ratepoll_common::{config, CommonError, PollerConfig};
