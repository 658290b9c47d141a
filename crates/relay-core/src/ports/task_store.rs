//! TaskStore port - タスクとそのライフサイクルの正本（source of truth）

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{StoreError, TaskId, TaskRecord, TaskState};
use crate::observability::QueueCounts;

/// claim_next_pending が返す、処理対象のタスク
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedTask {
    pub task_id: TaskId,
    pub prompt: String,
}

/// get_status が返す、状態と応答のスナップショット
///
/// `response` は Completed のときだけ Some。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusView {
    pub status: TaskState,
    pub response: Option<String>,
}

/// TaskStore port (interface).
///
/// # 設計原則
/// - すべての操作は単一の排他ロックの中で完結する（check-and-set はアトミック）
/// - ストアは待たない。完了待ちのポーリングは呼び出し側が行う
/// - ID は文字列で受ける。パースできない ID は「存在しない ID」と同じ扱い
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// 新しい Pending タスクを作成し、その ID を返す
    async fn create(&self, prompt: String) -> TaskId;

    /// 最も古い Pending タスクを Processing にして返す（なければ None）
    async fn claim_next_pending(&self) -> Option<ClaimedTask>;

    /// Processing のタスクに応答を付けて Completed にする
    async fn complete(&self, task_id: &str, response: String) -> Result<(), StoreError>;

    /// 現在の状態と（完了していれば）応答を返す
    async fn get_status(&self, task_id: &str) -> Result<TaskStatusView, StoreError>;

    /// Observability hook.
    async fn counts_by_state(&self) -> QueueCounts;

    /// Record のコピーを返す（診断・テスト用）
    async fn get(&self, task_id: &str) -> Option<TaskRecord>;
}
