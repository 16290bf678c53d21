//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{OperationError, OperationRequest, OperationResult, OperationSnapshot};
use crate::domain::params::DEFAULT_MODEL_REPO;
use crate::domain::{
    AudioInput, BackendVariant, Form, KokoroParams, ParamError, ReferenceSample, ResourceId,
    SesameParams, SparkParams, SparkVoiceParams, SynthesisParams, TranscribeParams, WordTimings,
    ZonosParams,
};
use crate::infrastructure::events::audio_url;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Clone DTOs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloneModel {
    SparkTts,
    Zonos,
}

/// 克隆表单请求（multipart 中的 `request` 字段）
#[derive(Debug, Deserialize)]
pub struct CloneRequestDto {
    pub text: String,
    #[serde(default)]
    pub prompt_text: Option<String>,
    pub model: CloneModel,
    #[serde(default)]
    pub spark: Option<SparkParams>,
    #[serde(default)]
    pub zonos: Option<ZonosParams>,
}

impl CloneRequestDto {
    /// 校验参数并组装操作请求；未提供的参数使用表单默认值
    pub fn into_request(self, reference_audio: Option<AudioInput>) -> Result<OperationRequest, ParamError> {
        let params = match self.model {
            CloneModel::SparkTts => SynthesisParams::CloneSpark(self.spark.unwrap_or_default()),
            CloneModel::Zonos => SynthesisParams::CloneZonos(self.zonos.unwrap_or_default()),
        };
        params.validate()?;

        let mut reference = ReferenceSample::none();
        if let Some(text) = self.prompt_text {
            reference = reference.with_text(text);
        }
        if let Some(audio) = reference_audio {
            reference = reference.with_audio(audio);
        }

        Ok(OperationRequest::voice_clone(self.text, reference, params))
    }
}

// ============================================================================
// Create DTOs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreateModel {
    SparkTts,
    Zonos,
    KokoroTts,
    Sesame,
}

/// 创建表单请求
#[derive(Debug, Deserialize)]
pub struct CreateRequestDto {
    pub model: CreateModel,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spark: Option<SparkVoiceParams>,
    #[serde(default)]
    pub zonos: Option<ZonosParams>,
    #[serde(default)]
    pub kokoro: Option<KokoroParams>,
    #[serde(default)]
    pub sesame: Option<SesameParams>,
}

impl CreateRequestDto {
    pub fn into_request(self) -> Result<OperationRequest, ParamError> {
        let params = match self.model {
            CreateModel::SparkTts => SynthesisParams::CreateSpark(self.spark.unwrap_or_default()),
            CreateModel::Zonos => SynthesisParams::CreateZonos(self.zonos.unwrap_or_default()),
            CreateModel::KokoroTts => SynthesisParams::CreateKokoro(self.kokoro.unwrap_or_default()),
            CreateModel::Sesame => SynthesisParams::CreateSesame(self.sesame.unwrap_or_default()),
        };
        params.validate()?;
        Ok(OperationRequest::voice_create(self.text, params))
    }
}

// ============================================================================
// Transcribe DTOs
// ============================================================================

fn default_word_timestamps() -> bool {
    true
}

fn default_model_repo() -> String {
    DEFAULT_MODEL_REPO.to_string()
}

/// 转写表单请求
#[derive(Debug, Deserialize)]
pub struct TranscribeRequestDto {
    #[serde(default = "default_word_timestamps")]
    pub word_timestamps: bool,
    #[serde(default = "default_model_repo")]
    pub model_repo: String,
}

impl Default for TranscribeRequestDto {
    fn default() -> Self {
        Self {
            word_timestamps: default_word_timestamps(),
            model_repo: default_model_repo(),
        }
    }
}

impl TranscribeRequestDto {
    pub fn into_request(self, audio: AudioInput) -> Result<OperationRequest, ParamError> {
        if self.model_repo.trim().is_empty() {
            return Err(ParamError::Empty("model_repo"));
        }
        Ok(OperationRequest::transcription(
            audio,
            TranscribeParams {
                word_timestamps: self.word_timestamps,
                model_repo: self.model_repo,
            },
        ))
    }
}

// ============================================================================
// Snapshot DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultDto {
    Audio {
        resource_id: ResourceId,
        url: String,
        media_type: String,
        size_bytes: usize,
    },
    Transcript {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        word_timings: Option<WordTimings>,
    },
}

impl From<OperationResult> for ResultDto {
    fn from(result: OperationResult) -> Self {
        match result {
            OperationResult::Audio(resource) => ResultDto::Audio {
                resource_id: resource.id,
                url: audio_url(&resource.id),
                media_type: resource.mime_type(),
                size_bytes: resource.size_bytes,
            },
            OperationResult::Transcript { text, word_timings } => {
                ResultDto::Transcript { text, word_timings }
            }
        }
    }
}

/// 表单快照
#[derive(Debug, Serialize)]
pub struct SnapshotDto {
    pub form: Form,
    pub operation_id: Option<Uuid>,
    pub variant: Option<BackendVariant>,
    pub state: String,
    pub result: Option<ResultDto>,
    pub error: Option<OperationError>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<OperationSnapshot> for SnapshotDto {
    fn from(s: OperationSnapshot) -> Self {
        Self {
            form: s.form,
            operation_id: s.operation_id,
            variant: s.variant,
            state: s.state.as_str().to_string(),
            result: s.result.map(ResultDto::from),
            error: s.error,
            started_at: s.started_at,
            finished_at: s.finished_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clone_request_defaults() {
        let dto: CloneRequestDto =
            serde_json::from_value(json!({"text": "Hello", "model": "spark-tts"})).unwrap();
        let request = dto.into_request(None).unwrap();
        assert_eq!(request.variant(), BackendVariant::CloneSpark);
        assert_eq!(
            request.params,
            SynthesisParams::CloneSpark(SparkParams::default())
        );
        assert!(request.reference.reference_text().is_none());
    }

    #[test]
    fn test_clone_request_out_of_range() {
        let dto: CloneRequestDto = serde_json::from_value(json!({
            "text": "Hello",
            "model": "zonos",
            "zonos": {"pitch_std": 65, "speaking_rate": 30}
        }))
        .unwrap();
        assert!(matches!(
            dto.into_request(None),
            Err(ParamError::OffStep { .. })
        ));
    }

    #[test]
    fn test_create_request_models() {
        let dto: CreateRequestDto = serde_json::from_value(json!({
            "model": "kokoro-tts",
            "text": "hi",
            "kokoro": {"voice": "am_soul", "lang_code": "a", "speed": 1.5}
        }))
        .unwrap();
        let request = dto.into_request().unwrap();
        assert_eq!(request.variant(), BackendVariant::CreateKokoro);

        let dto: CreateRequestDto = serde_json::from_value(json!({
            "model": "sesame",
            "sesame": {
                "turns": [{"text": "Hi", "speaker_id": 9, "max_audio_len": 3000}],
                "temperature": 0.2,
                "min_p": 0.8
            }
        }))
        .unwrap();
        assert!(dto.into_request().is_err());
    }

    #[test]
    fn test_unknown_model_rejected() {
        let result: Result<CreateRequestDto, _> =
            serde_json::from_value(json!({"model": "tacotron", "text": "hi"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_transcribe_request_defaults() {
        let dto: TranscribeRequestDto = serde_json::from_value(json!({})).unwrap();
        assert!(dto.word_timestamps);
        assert_eq!(dto.model_repo, DEFAULT_MODEL_REPO);

        let blank = TranscribeRequestDto {
            word_timestamps: false,
            model_repo: " ".to_string(),
        };
        let audio = AudioInput::from_upload(vec![1], Some("audio/wav"));
        assert!(blank.into_request(audio).is_err());
    }

    #[test]
    fn test_snapshot_dto_json() {
        let json = serde_json::to_value(SnapshotDto::from(OperationSnapshot::idle(Form::Create)))
            .unwrap();
        assert_eq!(json["form"], "create");
        assert_eq!(json["state"], "idle");
        assert!(json["result"].is_null());
    }
}
