//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                  GET   进程存活
//! - /api/health                GET   推理服务可达性
//! - /api/clone/generate        POST  声音克隆（multipart: request + 可选参考音频 file）
//! - /api/clone/state           GET   克隆表单快照
//! - /api/create/generate       POST  声音创建（JSON）
//! - /api/create/state          GET   创建表单快照
//! - /api/transcribe            POST  语音转写（multipart: 可选 request + file）
//! - /api/transcribe/state      GET   转写表单快照
//! - /api/audio/{resource_id}   GET   下载生成的音频
//! - /ws/events                 WS    操作状态与播放事件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .nest("/clone", clone_routes())
        .nest("/create", create_routes_for_form())
        .nest("/transcribe", transcribe_routes())
        .route("/audio/:resource_id", get(handlers::get_audio))
}

/// Clone 路由
fn clone_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::clone_generate))
        .route("/state", get(handlers::clone_state))
}

/// Create 路由
fn create_routes_for_form() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::create_generate))
        .route("/state", get(handlers::create_state))
}

/// Transcribe 路由
fn transcribe_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::transcribe))
        .route("/state", get(handlers::transcribe_state))
}
