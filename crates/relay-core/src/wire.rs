//! Wire - HTTP の JSON ボディ
//!
//! server と client の両方がこの型を使う。フィールド名は外部スクリプトとの契約なので変えないこと。

use serde::{Deserialize, Serialize};

use crate::domain::{TaskId, TaskState};
use crate::ports::{ClaimedTask, TaskStatusView};

/// `POST /api/send_prompt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPromptRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPromptResponse {
    pub task_id: TaskId,
}

/// `GET /api/get_prompt`
///
/// Pending がなければ両方 null。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPromptResponse {
    pub prompt: Option<String>,
    pub task_id: Option<TaskId>,
}

impl From<Option<ClaimedTask>> for GetPromptResponse {
    fn from(claimed: Option<ClaimedTask>) -> Self {
        match claimed {
            Some(task) => Self {
                prompt: Some(task.prompt),
                task_id: Some(task.task_id),
            },
            None => Self::default(),
        }
    }
}

/// `POST /api/receive_response`
///
/// task_id は文字列のまま受ける（未知・不正な ID は 404 にするため）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveResponseRequest {
    pub task_id: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveResponseResponse {
    pub status: String,
    pub message: String,
}

impl ReceiveResponseResponse {
    pub fn success(task_id: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: format!("Task {task_id} has been completed."),
        }
    }
}

/// `GET /api/get_response/{task_id}`
///
/// client 側は未知の status を検出したいので、受信時は `RawStatusResponse` を使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponseResponse {
    pub status: TaskState,
    pub response: Option<String>,
}

impl From<TaskStatusView> for GetResponseResponse {
    fn from(view: TaskStatusView) -> Self {
        Self {
            status: view.status,
            response: view.response,
        }
    }
}

/// status を文字列のまま受け取る版
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawStatusResponse {
    pub status: String,
    #[serde(default)]
    pub response: Option<String>,
}

/// エラー時のボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
