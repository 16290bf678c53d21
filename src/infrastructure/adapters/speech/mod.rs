//! Speech Adapter - 推理服务传输实现

mod fake_speech_client;
mod http_speech_client;

pub use fake_speech_client::{default_reply, silent_wav, FakeSpeechClient, FAKE_TRANSCRIPT};
pub use http_speech_client::{HttpSpeechClient, HttpSpeechClientConfig};
