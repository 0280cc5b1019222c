//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Target URL could not be parsed
    #[error("invalid URL {value:?}: {source}")]
    InvalidUrl {
        /// The offending input
        value: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// Rate is neither a float nor an integer
    #[error("{0} is not a float")]
    InvalidRate(String),
}
