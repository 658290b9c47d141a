//! Domain identifiers.
//!
//! # ULID ベースの TaskId
//! - **時刻でソート可能**: timestamp が先頭にあるため、生成順序でおおよそ並ぶ
//! - **調整なしで生成可能**: 採番用のカウンタを共有しなくてよい
//! - 表示・シリアライズは `task-<ULID>` 形式の文字列

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

const PREFIX: &str = "task-";

/// Identifier of a Task (one prompt/response pair).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Ulid);

impl TaskId {
    /// ULID から TaskId を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for TaskId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task id: {0}")]
pub struct ParseTaskIdError(String);

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    /// `task-<ULID>` のみ受け付ける（プレフィックスなしは不可）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| ParseTaskIdError(s.to_string()))?;
        Ulid::from_string(raw)
            .map(Self)
            .map_err(|_| ParseTaskIdError(s.to_string()))
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_task_prefix() {
        let ulid = Ulid::new();
        let id = TaskId::from_ulid(ulid);
        assert_eq!(id.to_string(), format!("task-{ulid}"));
        assert_eq!(id.as_ulid(), ulid);
    }

    #[test]
    fn parses_its_own_display() {
        let id = TaskId::from_ulid(Ulid::new());
        let parsed: TaskId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_strings_without_prefix_or_bad_ulid() {
        let ulid = Ulid::new();
        assert!(ulid.to_string().parse::<TaskId>().is_err());
        assert!("task-not-a-ulid".parse::<TaskId>().is_err());
        assert!("unknown-id".parse::<TaskId>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TaskId::from_ulid(Ulid::new());
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));

        let back: TaskId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ids_sort_by_creation_time() {
        let id1 = TaskId::from_ulid(Ulid::new());
        std::thread::sleep(std::time::Duration::from_millis(2)); // 時刻が進むのを待つ
        let id2 = TaskId::from_ulid(Ulid::new());
        assert!(id1 < id2);
    }
}
