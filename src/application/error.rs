//! 应用层错误定义
//!
//! 四类错误都只终止当前操作（failed 状态），不会导致进程崩溃

use serde::Serialize;
use thiserror::Error;

use super::ports::TransportError;
use crate::domain::CodecError;

/// 操作错误
///
/// 只携带字符串，可克隆后保存在表单状态中用于展示
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum OperationError {
    /// 前置条件不满足，本地拦截，未发送请求
    #[error("Invalid trigger: {0}")]
    InvalidTrigger(String),

    /// 网络错误或非成功 HTTP 状态
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// 回复已解析但缺少预期字段
    #[error("Missing payload: {0}")]
    MissingPayload(String),

    /// 预期字段存在但无法解码
    #[error("Malformed audio payload: {0}")]
    MalformedAudioPayload(String),
}

impl OperationError {
    pub fn invalid_trigger(message: impl Into<String>) -> Self {
        Self::InvalidTrigger(message.into())
    }

    pub fn missing_payload(field: impl Into<String>) -> Self {
        Self::MissingPayload(field.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OperationError::InvalidTrigger(_) => "invalid_trigger",
            OperationError::TransportFailure(_) => "transport_failure",
            OperationError::MissingPayload(_) => "missing_payload",
            OperationError::MalformedAudioPayload(_) => "malformed_audio_payload",
        }
    }
}

impl From<TransportError> for OperationError {
    fn from(err: TransportError) -> Self {
        Self::TransportFailure(err.to_string())
    }
}

impl From<CodecError> for OperationError {
    fn from(err: CodecError) -> Self {
        Self::MalformedAudioPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_for_display() {
        let err = OperationError::missing_payload("combined_audio");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"kind": "missing_payload", "message": "combined_audio"})
        );
        assert_eq!(err.kind(), "missing_payload");
    }

    #[test]
    fn test_from_transport_error() {
        let err: OperationError = TransportError::Timeout.into();
        assert!(matches!(err, OperationError::TransportFailure(_)));
    }
}
