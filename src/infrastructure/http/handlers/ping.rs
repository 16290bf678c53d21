//! Ping Handler
//!
//! 健康检查端点

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 进程存活
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub inference: bool,
    pub audio_resources: usize,
    pub event_subscribers: usize,
}

/// Health endpoint - 推理服务可达性
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let inference = state.transport.health_check().await;
    if !inference {
        tracing::warn!("Inference service health check failed");
    }

    Json(ApiResponse::success(HealthResponse {
        inference,
        audio_resources: state.resources.count(),
        event_subscribers: state.event_publisher.receiver_count(),
    }))
}
