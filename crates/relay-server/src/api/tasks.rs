//! Task endpoints: argument marshalling only, the store owns all rules.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use relay_core::wire::{
    GetPromptResponse, GetResponseResponse, ReceiveResponseRequest, ReceiveResponseResponse,
    SendPromptRequest, SendPromptResponse,
};

use super::AppState;
use crate::error::AppError;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Producer side: enqueue a prompt.
pub async fn send_prompt(
    State(state): State<AppState>,
    payload: Result<Json<SendPromptRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SendPromptResponse>), AppError> {
    let request = body(payload)?;
    let task_id = state.store.create(request.text).await;
    Ok((StatusCode::ACCEPTED, Json(SendPromptResponse { task_id })))
}

/// Consumer side: claim the oldest pending prompt, if any.
pub async fn get_prompt(State(state): State<AppState>) -> Json<GetPromptResponse> {
    Json(state.store.claim_next_pending().await.into())
}

/// Consumer side: attach the response to a claimed task.
pub async fn receive_response(
    State(state): State<AppState>,
    payload: Result<Json<ReceiveResponseRequest>, JsonRejection>,
) -> Result<Json<ReceiveResponseResponse>, AppError> {
    let request = body(payload)?;
    state
        .store
        .complete(&request.task_id, request.response)
        .await?;
    Ok(Json(ReceiveResponseResponse::success(&request.task_id)))
}

/// Producer side: poll for status and result.
pub async fn get_response(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<GetResponseResponse>, AppError> {
    let view = state.store.get_status(&task_id).await?;
    Ok(Json(view.into()))
}
