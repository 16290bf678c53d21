//! Domain Layer - 领域层
//!
//! 纯数据与纯函数，不依赖任何 I/O:
//! - variant: 后端变体与表单
//! - params: 各变体的合成参数
//! - conversation: 多说话人对话轮次
//! - media: 媒体子类型、输入音频、参考样本
//! - codec: 音频传输编码
//! - result: 归一化结果

pub mod codec;
pub mod conversation;
pub mod errors;
pub mod media;
pub mod params;
pub mod result;
pub mod variant;

pub use codec::{CodecError, PlayableResource, ResourceId};
pub use conversation::{Conversation, ConversationTurn};
pub use errors::ParamError;
pub use media::{AudioInput, MediaSubtype, ReferenceSample};
pub use params::{
    Emotion, Gender, KokoroParams, SesameParams, SparkParams, SparkVoiceParams, SynthesisParams,
    TranscribeParams, ZonosParams,
};
pub use result::{NormalizedResult, WordTiming, WordTimings};
pub use variant::{BackendVariant, Form};
