//! Errors - ストア操作のエラー

use thiserror::Error;

use super::TaskState;

/// StoreError は TaskStore が返す判別可能なエラー
///
/// `NotFound` は文字列で保持する（パースできない ID も「存在しない ID」として扱うため）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Task ID {0} not found.")]
    NotFound(String),

    #[error("Task {task_id} is not in 'processing' state (current: {state}).")]
    InvalidState { task_id: String, state: TaskState },
}
