//! InMemoryTaskStore - プロセス内のタスクストア
//!
//! # 実装詳細
//! - HashMap<TaskId, TaskRecord> が正本、VecDeque<TaskId> が Pending の到着順
//! - 全操作が一つの tokio::sync::Mutex を取る（読み取りも含む）
//! - 削除はしない（プロセスが生きている間は溜まり続ける）

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{StoreError, TaskId, TaskRecord, TaskState};
use crate::observability::QueueCounts;
use crate::ports::{
    ClaimedTask, Clock, IdGenerator, SystemClock, TaskStatusView, TaskStore, UlidGenerator,
};

/// In-memory store state.
struct InMemoryStoreState {
    /// All task records (single source of truth).
    records: HashMap<TaskId, TaskRecord>,

    /// Pending queue (TaskIds only, creation order).
    pending: VecDeque<TaskId>,
}

impl InMemoryStoreState {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            pending: VecDeque::new(),
        }
    }

    /// Allocate a TaskId that no existing record uses.
    fn allocate_task_id(&self, id_gen: &dyn IdGenerator) -> TaskId {
        loop {
            let id = id_gen.generate_task_id();
            if !self.records.contains_key(&id) {
                return id;
            }
            warn!(task_id = %id, "generated task id collided; regenerating");
        }
    }

    fn lookup(&self, task_id: &str) -> Option<&TaskRecord> {
        let id = task_id.parse::<TaskId>().ok()?;
        self.records.get(&id)
    }

    fn lookup_mut(&mut self, task_id: &str) -> Option<&mut TaskRecord> {
        let id = task_id.parse::<TaskId>().ok()?;
        self.records.get_mut(&id)
    }

    fn counts_by_state(&self) -> QueueCounts {
        let mut counts = QueueCounts::default();
        for record in self.records.values() {
            match record.state {
                TaskState::Pending => counts.pending += 1,
                TaskState::Processing => counts.processing += 1,
                TaskState::Completed => counts.completed += 1,
            }
        }
        counts
    }
}

/// In-memory TaskStore implementation.
///
/// 起動時に一つだけ作り、`Arc<dyn TaskStore>` として HTTP 層に渡す。
pub struct InMemoryTaskStore {
    state: Mutex<InMemoryStoreState>,
    clock: Arc<dyn Clock>,
    id_gen: Box<dyn IdGenerator>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::with_ports(Arc::new(SystemClock), Box::new(UlidGenerator::new(SystemClock)))
    }

    /// Clock / IdGenerator を差し替えて作成（テスト用）
    pub fn with_ports(clock: Arc<dyn Clock>, id_gen: Box<dyn IdGenerator>) -> Self {
        Self {
            state: Mutex::new(InMemoryStoreState::new()),
            clock,
            id_gen,
        }
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, prompt: String) -> TaskId {
        let mut state = self.state.lock().await;
        let task_id = state.allocate_task_id(self.id_gen.as_ref());
        let record = TaskRecord::new(task_id, prompt, self.clock.now());

        state.records.insert(task_id, record);
        state.pending.push_back(task_id);

        info!(task_id = %task_id, "New task created");
        task_id
    }

    async fn claim_next_pending(&self) -> Option<ClaimedTask> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        while let Some(task_id) = state.pending.pop_front() {
            // pending キューには Pending のものしか入らないが、念のため状態で判定する
            let Some(record) = state
                .records
                .get_mut(&task_id)
                .filter(|record| record.state.is_claimable())
            else {
                continue;
            };
            if let Err(err) = record.mark_processing(now) {
                warn!(task_id = %task_id, error = %err, "skipping unclaimable task");
                continue;
            }
            info!(task_id = %task_id, "Task picked up by consumer");
            return Some(ClaimedTask {
                task_id,
                prompt: record.prompt.clone(),
            });
        }
        None
    }

    async fn complete(&self, task_id: &str, response: String) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        let record = state
            .lookup_mut(task_id)
            .ok_or_else(|| StoreError::NotFound(task_id.to_string()))?;

        if let Err(err) = record.mark_completed(response, now) {
            warn!(
                task_id = %task_id,
                state = %record.state,
                "Received response for task which is not in 'processing' state"
            );
            return Err(err);
        }

        info!(task_id = %task_id, "Task completed");
        Ok(())
    }

    async fn get_status(&self, task_id: &str) -> Result<TaskStatusView, StoreError> {
        let state = self.state.lock().await;
        let record = state
            .lookup(task_id)
            .ok_or_else(|| StoreError::NotFound(task_id.to_string()))?;

        Ok(TaskStatusView {
            status: record.state,
            response: if record.state.is_terminal() {
                record.response.clone()
            } else {
                None
            },
        })
    }

    async fn counts_by_state(&self) -> QueueCounts {
        let state = self.state.lock().await;
        state.counts_by_state()
    }

    async fn get(&self, task_id: &str) -> Option<TaskRecord> {
        let state = self.state.lock().await;
        state.lookup(task_id).cloned()
    }
}
