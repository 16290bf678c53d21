//! VoxStudio - 语音合成 / 克隆 / 转写工作台后端
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 后端变体、合成参数、对话轮次、音频编码、归一化结果
//!
//! 应用层 (application/):
//! - Adapter / Composer / Normalizer: 纯函数管线
//! - Lifecycle: 每个表单的操作状态机
//! - Ports: SpeechTransport、AudioResource、OperationEvents
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: OpenAI 兼容 HTTP 客户端、Fake 客户端
//! - Memory: 音频资源内存表
//! - Events: WebSocket 事件发布
//! - HTTP: RESTful API + WebSocket

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
