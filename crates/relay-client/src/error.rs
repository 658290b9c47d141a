use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection failure or non-2xx response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not get task ID from server.")]
    MissingTaskId,

    /// The server reported a status outside pending/processing/completed.
    #[error("An unexpected status occurred: {0}")]
    UnexpectedStatus(String),

    #[error("gave up waiting for {task_id} after {waited:?}")]
    Timeout { task_id: String, waited: Duration },
}
