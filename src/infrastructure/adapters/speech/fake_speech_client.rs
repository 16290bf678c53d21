//! Fake Speech Client - 用于测试与离线演示的推理客户端
//!
//! 按脚本依次返回回复；脚本耗尽后返回一个同时满足三种回复形态的默认回复
//! （静音 WAV + 固定转写文本）

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::envelope::ProtocolEnvelope;
use crate::application::ports::{SpeechTransportPort, TransportError};
use crate::domain::codec;

/// 默认回复中的转写文本
pub const FAKE_TRANSCRIPT: &str = "fake transcript";

/// 44 字节的空 WAV（单声道 16bit 24kHz，无采样）
pub fn silent_wav() -> Vec<u8> {
    let sample_rate: u32 = 24_000;
    let mut wav = Vec::with_capacity(44);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&36u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav
}

/// 默认回复
pub fn default_reply() -> Value {
    let audio = codec::encode(&silent_wav());
    json!({
        "choices": [{
            "message": {
                "content": FAKE_TRANSCRIPT,
                "audio": {"data": audio},
                "word_timestamps": [
                    {"word": "fake", "start": 0.0, "end": 0.4},
                    {"word": "transcript", "start": 0.4, "end": 1.0}
                ]
            }
        }],
        "combined_audio": audio
    })
}

struct ScriptedReply {
    outcome: Result<Value, TransportError>,
    delay: Duration,
}

/// Fake Speech Client
pub struct FakeSpeechClient {
    script: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<Value>>,
    calls: AtomicUsize,
    healthy: bool,
}

impl Default for FakeSpeechClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSpeechClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            healthy: true,
        }
    }

    /// 追加一个立即返回的回复
    pub fn with_reply(self, reply: Value) -> Self {
        self.with_reply_after(reply, Duration::ZERO)
    }

    /// 追加一个延迟返回的回复
    pub fn with_reply_after(self, reply: Value, delay: Duration) -> Self {
        self.push(ScriptedReply {
            outcome: Ok(reply),
            delay,
        })
    }

    /// 追加一次网络失败
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(ScriptedReply {
            outcome: Err(TransportError::NetworkError(message.into())),
            delay: Duration::ZERO,
        })
    }

    pub fn with_health(mut self, healthy: bool) -> Self {
        self.healthy = healthy;
        self
    }

    fn push(self, reply: ScriptedReply) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(reply);
        }
        self
    }

    /// 已发送的信封（JSON 形式）
    pub fn requests(&self) -> Vec<Value> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechTransportPort for FakeSpeechClient {
    async fn send(&self, envelope: &ProtocolEnvelope) -> Result<Value, TransportError> {
        let body = serde_json::to_value(envelope)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(body);
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        self.calls.fetch_add(1, Ordering::SeqCst);

        let ScriptedReply { outcome, delay } = scripted.unwrap_or_else(|| ScriptedReply {
            outcome: Ok(default_reply()),
            delay: Duration::ZERO,
        });

        tracing::debug!(
            model = %envelope.model,
            delay_ms = delay.as_millis() as u64,
            "FakeSpeechClient: returning scripted reply"
        );

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::adapter::adapt;
    use crate::application::composer::compose;
    use crate::application::operation::OperationRequest;
    use crate::domain::{SynthesisParams, ZonosParams};

    fn envelope() -> ProtocolEnvelope {
        let request = OperationRequest::voice_create(
            "hi",
            SynthesisParams::CreateZonos(ZonosParams::default()),
        );
        compose(&request, adapt(&request.params))
    }

    #[test]
    fn test_silent_wav_header() {
        let wav = silent_wav();
        assert_eq!(wav.len(), 44);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");
    }

    #[tokio::test]
    async fn test_script_then_default() {
        let client = FakeSpeechClient::new()
            .with_reply(json!({"first": true}))
            .with_failure("down");

        assert_eq!(client.send(&envelope()).await.unwrap(), json!({"first": true}));
        assert!(matches!(
            client.send(&envelope()).await,
            Err(TransportError::NetworkError(_))
        ));
        assert_eq!(client.send(&envelope()).await.unwrap(), default_reply());
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_records_requests() {
        let client = FakeSpeechClient::new();
        client.send(&envelope()).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["model"], "zonos");
        assert_eq!(requests[0]["audio"]["voice"], "zonos");
    }
}
