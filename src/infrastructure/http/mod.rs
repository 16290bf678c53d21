//! HTTP Layer - RESTful API + WebSocket
//!
//! 三个表单的外部门面：参数范围在这里校验，再交给 SpeechStudio

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
