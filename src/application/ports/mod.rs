//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_resource;
mod operation_events;
mod speech_transport;

pub use audio_resource::{AudioResourcePort, StoredAudio};
pub use operation_events::OperationEventsPort;
pub use speech_transport::{SpeechTransportPort, TransportError};
