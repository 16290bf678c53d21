//! 应用层 - 用例编排
//!
//! 包含：
//! - adapter: 表单参数 -> 后端控制参数
//! - composer: 组装推理请求信封
//! - normalizer: 三种回复形态的归一化
//! - lifecycle: 单表单单操作的状态机
//! - ports: 六边形架构端口定义（SpeechTransport、AudioResource、OperationEvents）
//! - error: 应用层错误定义

pub mod adapter;
pub mod composer;
pub mod envelope;
pub mod error;
pub mod lifecycle;
pub mod normalizer;
pub mod operation;
pub mod ports;

pub use adapter::{adapt, AdaptedParameters, ControlParameters};
pub use composer::compose;
pub use envelope::{ContentPart, InlineAudio, MessageBody, MessageEntry, Modality, ProtocolEnvelope, Role};
pub use error::OperationError;
pub use lifecycle::{check_trigger, FormController, SpeechStudio};
pub use normalizer::{normalize, ReplyShape};
pub use operation::{
    LifecycleState, OperationRequest, OperationResult, OperationSnapshot, TriggerOutcome,
};

pub use ports::{
    AudioResourcePort, OperationEventsPort, SpeechTransportPort, StoredAudio, TransportError,
};
