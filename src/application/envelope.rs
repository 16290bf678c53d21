//! Protocol Envelope - 推理服务请求的线上结构
//!
//! ```json
//! {
//!   "model": "spark-tts",
//!   "modalities": ["text", "audio"],
//!   "audio": { ... },
//!   "messages": [
//!     {"role": "user", "content": [{"type": "text", "text": "..."}]},
//!     {"role": "user", "text": "..."}
//!   ]
//! }
//! ```

use serde::Serialize;

use super::adapter::ControlParameters;

/// 请求的输出模态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Audio,
}

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// 内联音频
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineAudio {
    /// 传输编码后的音频
    pub data: String,
    /// 媒体子类型
    pub format: String,
}

/// 内容片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    InputAudio { input_audio: InlineAudio },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// 消息主体：内容片段列表，或对话变体使用的纯文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageBody {
    Content(Vec<ContentPart>),
    Text(String),
}

/// 消息条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEntry {
    pub role: Role,
    #[serde(flatten)]
    pub body: MessageBody,
}

impl MessageEntry {
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            body: MessageBody::Content(parts),
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            body: MessageBody::Text(text.into()),
        }
    }
}

/// 协议信封
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolEnvelope {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<Modality>>,
    pub audio: ControlParameters,
    pub messages: Vec<MessageEntry>,
}
