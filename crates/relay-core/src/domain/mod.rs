//! Domain model (IDs, task state, records, errors).

pub mod errors;
pub mod ids;
pub mod state;
pub mod task;

pub use self::errors::StoreError;
pub use self::ids::{ParseTaskIdError, TaskId};
pub use self::state::TaskState;
pub use self::task::TaskRecord;
