//! Ports - 抽象化レイヤー
//!
//! 各 trait は差し替え可能な境界を表します。
//! 現状の実装はすべてプロセス内（インメモリ）です。

pub mod task_store;
pub mod clock;
pub mod id_generator;

pub use self::task_store::{ClaimedTask, TaskStatusView, TaskStore};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
