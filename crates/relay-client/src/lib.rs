//! relay-client
//!
//! プロンプトを投入し、完了するまで get_response をポーリングする呼び出し側。
//! 待ち時間には必ず上限がある（`PollPolicy::max_wait`）。

mod client;
mod error;
mod policy;

pub use client::{DEFAULT_REQUEST_TIMEOUT, RelayClient};
pub use error::ClientError;
pub use policy::{MIN_INTERVAL, PollPolicy};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
