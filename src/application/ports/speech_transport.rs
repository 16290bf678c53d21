//! Speech Transport Port - 推理服务传输抽象
//!
//! 只有一个核心方法：发送信封，返回原始回复或失败。
//! 具体实现在 infrastructure/adapters 层，控制器通过注入使用

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::application::envelope::ProtocolEnvelope;

/// 传输错误
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Speech Transport Port
///
/// 外部推理服务的抽象接口
#[async_trait]
pub trait SpeechTransportPort: Send + Sync {
    /// 发送一次请求并等待回复
    ///
    /// 唯一可能挂起调用方的步骤
    async fn send(&self, envelope: &ProtocolEnvelope) -> Result<Value, TransportError>;

    /// 检查推理服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
