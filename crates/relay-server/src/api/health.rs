use axum::{Json, extract::State};
use relay_core::QueueCounts;
use serde_json::{Value, json};

use super::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Prompt relay server is running.",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn counts(State(state): State<AppState>) -> Json<QueueCounts> {
    Json(state.store.counts_by_state().await)
}
