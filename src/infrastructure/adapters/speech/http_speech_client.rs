//! HTTP Speech Client - 调用 OpenAI 兼容的推理服务
//!
//! 实现 SpeechTransportPort trait
//!
//! 推理 API:
//! POST {base_url}/chat/completions
//! Authorization: Bearer {api_key}
//! Request: ProtocolEnvelope (JSON)
//! Response: JSON，形态取决于模型

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::application::envelope::ProtocolEnvelope;
use crate::application::ports::{SpeechTransportPort, TransportError};

/// HTTP 推理客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// 推理服务基础 URL（含 /v1）
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_string(),
            api_key: "dummy-key".to_string(),
            timeout_secs: 300,
        }
    }
}

impl HttpSpeechClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 推理客户端
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
}

impl HttpSpeechClient {
    pub fn new(config: HttpSpeechClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechTransportPort for HttpSpeechClient {
    async fn send(&self, envelope: &ProtocolEnvelope) -> Result<Value, TransportError> {
        tracing::debug!(
            url = %self.completions_url(),
            model = %envelope.model,
            messages = envelope.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(envelope)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else if e.is_connect() {
                    TransportError::NetworkError(format!(
                        "Cannot connect to inference service: {}",
                        e
                    ))
                } else {
                    TransportError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::InvalidResponse(format!("Failed to parse reply: {}", e))
            }
        })?;

        tracing::debug!(model = %envelope.model, "Chat completion reply received");
        Ok(raw)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.models_url())
            .bearer_auth(&self.config.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
