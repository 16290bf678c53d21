//! Synthesis Parameters - 各变体的领域参数
//!
//! 每个变体拥有独立的字段集合，不跨变体复用字段。
//! `validate` 供 UI 侧边界使用；适配器不做范围检查。

use serde::{Deserialize, Serialize};

use super::conversation::Conversation;
use super::errors::ParamError;
use super::variant::BackendVariant;

/// 默认转写模型仓库
pub const DEFAULT_MODEL_REPO: &str = "mlx-community/whisper-large-v3-turbo";

/// Spark 的 1..=5 档位
fn validate_level(field: &'static str, value: u8) -> Result<(), ParamError> {
    if !(1..=5).contains(&value) {
        return Err(ParamError::out_of_range(field, value, "1..=5"));
    }
    Ok(())
}

fn validate_unit(field: &'static str, value: f64) -> Result<(), ParamError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ParamError::out_of_range(field, value, "0.0..=1.0"));
    }
    Ok(())
}

/// Spark 克隆参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkParams {
    pub pitch: u8,
    pub speed: u8,
}

impl Default for SparkParams {
    fn default() -> Self {
        Self { pitch: 3, speed: 3 }
    }
}

impl SparkParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        validate_level("pitch", self.pitch)?;
        validate_level("speed", self.speed)
    }
}

/// 性别选择（映射到两个固定音色）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Spark 创建参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkVoiceParams {
    #[serde(default)]
    pub gender: Gender,
    pub pitch: u8,
    pub speed: u8,
}

impl Default for SparkVoiceParams {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            pitch: 3,
            speed: 3,
        }
    }
}

impl SparkVoiceParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        validate_level("pitch", self.pitch)?;
        validate_level("speed", self.speed)
    }
}

/// Zonos 情绪
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Surprised,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprised",
        }
    }
}

/// Zonos 参数（克隆与创建共用同一结构，但按变体分别解释）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonosParams {
    /// 音高标准差 (0 - 400，步长 10)
    pub pitch_std: u16,
    /// 语速 (0 - 40)
    pub speaking_rate: u8,
    #[serde(default)]
    pub emotion: Emotion,
}

impl Default for ZonosParams {
    fn default() -> Self {
        Self {
            pitch_std: 60,
            speaking_rate: 30,
            emotion: Emotion::Neutral,
        }
    }
}

impl ZonosParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.pitch_std > 400 {
            return Err(ParamError::out_of_range("pitch_std", self.pitch_std, "0..=400"));
        }
        if self.pitch_std % 10 != 0 {
            return Err(ParamError::OffStep {
                field: "pitch_std",
                value: self.pitch_std,
                step: 10,
            });
        }
        if self.speaking_rate > 40 {
            return Err(ParamError::out_of_range(
                "speaking_rate",
                self.speaking_rate,
                "0..=40",
            ));
        }
        Ok(())
    }
}

/// Kokoro 参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KokoroParams {
    /// 音色 ID，例如 af_heart / af_soul / am_heart / am_soul
    pub voice: String,
    /// 语言代码，自由格式短代码
    pub lang_code: String,
    /// 语速 (0.5 - 2.0)
    pub speed: f64,
}

impl Default for KokoroParams {
    fn default() -> Self {
        Self {
            voice: "af_heart".to_string(),
            lang_code: "a".to_string(),
            speed: 1.0,
        }
    }
}

impl KokoroParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.voice.trim().is_empty() {
            return Err(ParamError::Empty("voice"));
        }
        if !(0.5..=2.0).contains(&self.speed) {
            return Err(ParamError::out_of_range("speed", self.speed, "0.5..=2.0"));
        }
        Ok(())
    }
}

/// Sesame 多说话人对话参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SesameParams {
    #[serde(rename = "turns", default)]
    pub conversation: Conversation,
    /// 采样温度 (0.0 - 1.0)
    pub temperature: f64,
    /// 最小概率 (0.0 - 1.0)
    #[serde(rename = "min_p")]
    pub min_probability: f64,
}

impl Default for SesameParams {
    fn default() -> Self {
        Self {
            conversation: Conversation::default(),
            temperature: 0.2,
            min_probability: 0.8,
        }
    }
}

impl SesameParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        validate_unit("temperature", self.temperature)?;
        validate_unit("min_p", self.min_probability)?;
        self.conversation.validate()
    }
}

/// 转写参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeParams {
    pub word_timestamps: bool,
    /// 模型仓库标识，原样转发
    pub model_repo: String,
}

impl Default for TranscribeParams {
    fn default() -> Self {
        Self {
            word_timestamps: true,
            model_repo: DEFAULT_MODEL_REPO.to_string(),
        }
    }
}

/// 变体标签化的参数记录
///
/// 参数只与其变体标签一起解释
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisParams {
    CloneSpark(SparkParams),
    CloneZonos(ZonosParams),
    CreateSpark(SparkVoiceParams),
    CreateZonos(ZonosParams),
    CreateKokoro(KokoroParams),
    CreateSesame(SesameParams),
    Transcribe(TranscribeParams),
}

impl SynthesisParams {
    pub fn variant(&self) -> BackendVariant {
        match self {
            Self::CloneSpark(_) => BackendVariant::CloneSpark,
            Self::CloneZonos(_) => BackendVariant::CloneZonos,
            Self::CreateSpark(_) => BackendVariant::CreateSpark,
            Self::CreateZonos(_) => BackendVariant::CreateZonos,
            Self::CreateKokoro(_) => BackendVariant::CreateKokoro,
            Self::CreateSesame(_) => BackendVariant::CreateSesame,
            Self::Transcribe(_) => BackendVariant::Transcribe,
        }
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        match self {
            Self::CloneSpark(p) => p.validate(),
            Self::CloneZonos(p) | Self::CreateZonos(p) => p.validate(),
            Self::CreateSpark(p) => p.validate(),
            Self::CreateKokoro(p) => p.validate(),
            Self::CreateSesame(p) => p.validate(),
            Self::Transcribe(_) => Ok(()),
        }
    }
}
