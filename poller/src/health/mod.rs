//! ヘルスポーリング
//!
//! レート制限付きで対象URLへGETを送り続け、結果をログに出力する。

pub mod outcome;
pub mod poller;

pub use outcome::{FailureKind, PollOutcome};
pub use poller::{Poller, PollerError};
