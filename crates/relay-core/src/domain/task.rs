//! Task record: prompt + response + state.

use chrono::{DateTime, Utc};

use super::{StoreError, TaskId, TaskState};

/// Metadata + payload for a task in the store.
///
/// Design:
/// - This is the "single source of truth" for task state.
/// - The pending queue holds TaskId only.
/// - All state transitions happen here.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub task_id: TaskId,
    pub prompt: String,
    pub state: TaskState,

    /// Set exactly once, on Processing -> Completed.
    pub response: Option<String>,

    /// Timestamps for observability.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    pub fn new(task_id: TaskId, prompt: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            task_id,
            prompt: prompt.into(),
            state: TaskState::Pending,
            response: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Pending -> Processing
    pub fn mark_processing(&mut self, now: DateTime<Utc>) -> Result<(), StoreError> {
        self.transition(TaskState::Processing, now)
    }

    /// Processing -> Completed (response attached)
    pub fn mark_completed(
        &mut self,
        response: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.transition(TaskState::Completed, now)?;
        self.response = Some(response.into());
        Ok(())
    }

    fn transition(&mut self, next: TaskState, now: DateTime<Utc>) -> Result<(), StoreError> {
        if !self.state.can_transition_to(next) {
            return Err(StoreError::InvalidState {
                task_id: self.task_id.to_string(),
                state: self.state,
            });
        }
        self.state = next;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ulid::Ulid;

    fn record() -> TaskRecord {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        TaskRecord::new(TaskId::from_ulid(Ulid::new()), "Q1", t0)
    }

    #[test]
    fn new_record_is_pending_without_response() {
        let r = record();
        assert_eq!(r.state, TaskState::Pending);
        assert_eq!(r.response, None);
        assert_eq!(r.created_at, r.updated_at);
    }

    #[test]
    fn full_lifecycle_sets_response_once() {
        let mut r = record();
        let t1 = r.created_at + chrono::Duration::seconds(1);
        let t2 = r.created_at + chrono::Duration::seconds(2);

        r.mark_processing(t1).unwrap();
        assert_eq!(r.state, TaskState::Processing);
        assert_eq!(r.response, None);

        r.mark_completed("R1", t2).unwrap();
        assert_eq!(r.state, TaskState::Completed);
        assert_eq!(r.response.as_deref(), Some("R1"));
        assert_eq!(r.updated_at, t2);

        // Completed は終端。二度目の complete は拒否され、応答も変わらない
        let err = r.mark_completed("R2", t2).unwrap_err();
        assert!(matches!(err, StoreError::InvalidState { state: TaskState::Completed, .. }));
        assert_eq!(r.response.as_deref(), Some("R1"));
    }

    #[test]
    fn completing_a_pending_record_is_rejected() {
        let mut r = record();
        let now = r.created_at;
        let err = r.mark_completed("too early", now).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidState {
                task_id: r.task_id.to_string(),
                state: TaskState::Pending,
            }
        );
        assert_eq!(r.state, TaskState::Pending);
        assert_eq!(r.response, None);
    }
}
