//! Task state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// TaskState はタスクの状態を表現
///
/// State transitions (strictly forward, no skipping):
/// - Pending -> Processing -> Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Waiting to be claimed by the browser-side consumer.
    Pending,

    /// Claimed; the consumer is producing a response.
    Processing,

    /// Response attached. Terminal.
    Completed,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::Processing => "processing",
            TaskState::Completed => "completed",
        }
    }

    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed)
    }

    /// Is this task claimable?
    pub fn is_claimable(self) -> bool {
        matches!(self, TaskState::Pending)
    }

    /// `self -> next` が許される遷移か
    pub fn can_transition_to(self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (TaskState::Pending, TaskState::Processing)
                | (TaskState::Processing, TaskState::Completed)
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskState::Pending),
            "processing" => Ok(TaskState::Processing),
            "completed" => Ok(TaskState::Completed),
            other => Err(other.to_string()),
        }
    }
}
