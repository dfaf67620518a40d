use std::sync::Arc;

use axum::Json;
use tracing::info;

use crate::SERVICE_NAME;
use crate::api::{HealthResponse, PingResponse};
use crate::store::BookmarkStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self { store }
    }
}

pub async fn healthcheck() -> Json<HealthResponse> {
    info!("got healthcheck request");
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}
