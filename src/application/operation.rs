//! Operation - 操作请求、生命周期状态与快照

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::error::OperationError;
use crate::domain::{
    AudioInput, BackendVariant, Form, PlayableResource, ReferenceSample, SynthesisParams,
    WordTimings,
};

/// 操作请求
///
/// 由 UI 侧提供已校验的参数；text 只对单文本变体有意义，
/// 对话变体的文本来自参数中的轮次
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub params: SynthesisParams,
    pub text: String,
    pub reference: ReferenceSample,
    pub input_audio: Option<AudioInput>,
}

impl OperationRequest {
    /// 声音克隆（Spark / Zonos）
    pub fn voice_clone(
        text: impl Into<String>,
        reference: ReferenceSample,
        params: SynthesisParams,
    ) -> Self {
        Self {
            params,
            text: text.into(),
            reference,
            input_audio: None,
        }
    }

    /// 声音创建（Spark / Zonos / Kokoro / Sesame）
    pub fn voice_create(text: impl Into<String>, params: SynthesisParams) -> Self {
        Self {
            params,
            text: text.into(),
            reference: ReferenceSample::none(),
            input_audio: None,
        }
    }

    /// 语音转写
    pub fn transcription(audio: AudioInput, params: crate::domain::TranscribeParams) -> Self {
        Self {
            params: SynthesisParams::Transcribe(params),
            text: String::new(),
            reference: ReferenceSample::none(),
            input_audio: Some(audio),
        }
    }

    pub fn variant(&self) -> BackendVariant {
        self.params.variant()
    }
}

/// 生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::InFlight => "in_flight",
            LifecycleState::Succeeded => "succeeded",
            LifecycleState::Failed => "failed",
        }
    }
}

/// 表单中保存的结果
///
/// 音频结果只保存资源句柄，字节由 AudioResourcePort 持有
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Audio(PlayableResource),
    Transcript {
        text: String,
        word_timings: Option<WordTimings>,
    },
}

/// 操作快照（对外只读视图）
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSnapshot {
    pub form: Form,
    pub operation_id: Option<Uuid>,
    pub variant: Option<BackendVariant>,
    pub state: LifecycleState,
    pub result: Option<OperationResult>,
    pub error: Option<OperationError>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl OperationSnapshot {
    /// 尚未触发过任何操作
    pub fn idle(form: Form) -> Self {
        Self {
            form,
            operation_id: None,
            variant: None,
            state: LifecycleState::Idle,
            result: None,
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn resource(&self) -> Option<&PlayableResource> {
        match &self.result {
            Some(OperationResult::Audio(resource)) => Some(resource),
            _ => None,
        }
    }
}

/// 触发结果
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// 操作成功结束
    Settled(OperationSnapshot),
    /// 回复到达前已被同表单的新操作取代，结果被丢弃
    Superseded { operation_id: Uuid },
}
