use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use relay_core::TaskStore;

pub mod health;
pub mod tasks;

/// Shared handler state. The store is the only mutable thing the facade touches.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/send_prompt", post(tasks::send_prompt))
        .route("/get_prompt", get(tasks::get_prompt))
        .route("/receive_response", post(tasks::receive_response))
        .route("/get_response/{task_id}", get(tasks::get_response))
        .route("/counts", get(health::counts));

    Router::new()
        .route("/", get(health::root))
        .nest("/api", api)
        .with_state(state)
}
