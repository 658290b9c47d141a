//! relay-core
//!
//! プロンプト中継サーバーの中核部分。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, task, errors）
//! - **ports**: 抽象化レイヤー（TaskStore, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryTaskStore）
//! - **wire**: HTTP でやり取りする JSON の形（server / client で共有）
//! - **observability**: 状態ごとの件数など

pub mod domain;
pub mod ports;
pub mod impls;
pub mod wire;
pub mod observability;

pub use self::domain::{StoreError, TaskId, TaskRecord, TaskState};
pub use self::impls::InMemoryTaskStore;
pub use self::observability::QueueCounts;
pub use self::ports::{ClaimedTask, TaskStatusView, TaskStore};
