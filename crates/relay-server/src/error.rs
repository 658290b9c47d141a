use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::StoreError;
use relay_core::wire::ErrorBody;
use thiserror::Error;
use tracing::debug;

/// Error type returned by every handler.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete request body.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::InvalidState { .. }) => StatusCode::CONFLICT,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Store(StoreError::InvalidState { .. }) => {
                "Task is not in 'processing' state.".to_string()
            }
            AppError::Store(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(status = status.as_u16(), error = %self, "request rejected");
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::TaskState;
    use rstest::rstest;

    #[rstest]
    #[case::not_found(AppError::Store(StoreError::NotFound("x".into())), StatusCode::NOT_FOUND)]
    #[case::wrong_state(
        AppError::Store(StoreError::InvalidState {
            task_id: "x".into(),
            state: TaskState::Pending,
        }),
        StatusCode::CONFLICT
    )]
    #[case::validation(
        AppError::Validation("missing field `text`".into()),
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    fn maps_to_distinct_status_codes(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(err.into_response().status(), expected);
    }

    #[test]
    fn not_found_detail_names_the_id() {
        let err = AppError::from(StoreError::NotFound("task-abc".into()));
        assert_eq!(err.detail(), "Task ID task-abc not found.");
    }
}
