//! ratepoll 共通ライブラリ
//!
//! 設定読み込みとエラー型

#![warn(missing_docs)]

/// 設定管理（環境変数ヘルパー、URL/レート解析）
pub mod config;

/// エラー型定義
pub mod error;

pub use config::PollerConfig;
pub use error::CommonError;
