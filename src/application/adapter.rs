//! Backend Parameter Adapter - 领域参数到后端控制参数的映射
//!
//! 纯函数、无隐藏状态：相同输入总是得到相同输出。
//! 不做范围裁剪，越界值由调用方在此之前拒绝。

use serde::Serialize;

use crate::domain::{
    Emotion, Gender, KokoroParams, SesameParams, SparkParams, SparkVoiceParams, SynthesisParams,
    TranscribeParams, ZonosParams,
};

/// 所有合成请求的输出格式
pub const OUTPUT_FORMAT: &str = "wav";
/// 克隆变体使用的音色标识
pub const CLONE_VOICE: &str = "clone";
/// Zonos 创建变体使用的音色标识
pub const ZONOS_VOICE: &str = "zonos";
/// Spark 创建：男声
pub const MALE_VOICE: &str = "alloy";
/// Spark 创建：女声
pub const FEMALE_VOICE: &str = "shimmer";

/// Spark 控制参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparkControl {
    pub voice: String,
    pub format: String,
    pub pitch: u8,
    pub speed: u8,
}

/// Zonos 控制参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZonosControl {
    pub voice: String,
    pub format: String,
    pub pitch_std: u16,
    pub speaking_rate: u8,
    pub emotion: Emotion,
}

/// Kokoro 控制参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KokoroControl {
    pub voice: String,
    pub format: String,
    pub lang_code: String,
    pub speed: f64,
}

/// 多说话人对话控制参数
///
/// speakers 与 max_audio_lens 按存活轮次下标对齐
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueControl {
    pub speakers: Vec<u8>,
    pub format: String,
    #[serde(rename = "temp")]
    pub temperature: f64,
    #[serde(rename = "min_p")]
    pub min_probability: f64,
    pub max_audio_lens: Vec<u32>,
}

/// 转写控制参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptionControl {
    pub word_timestamps: bool,
    pub model_repo: String,
}

/// 控制参数块（协议中的 `audio` 字段）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ControlParameters {
    Spark(SparkControl),
    Zonos(ZonosControl),
    Kokoro(KokoroControl),
    Dialogue(DialogueControl),
    Transcription(TranscriptionControl),
}

/// 适配结果
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptedParameters {
    pub model_id: &'static str,
    pub control: ControlParameters,
}

/// 将领域参数映射为 (模型标识, 控制参数)
pub fn adapt(params: &SynthesisParams) -> AdaptedParameters {
    let control = match params {
        SynthesisParams::CloneSpark(p) => ControlParameters::Spark(spark_clone(p)),
        SynthesisParams::CloneZonos(p) => ControlParameters::Zonos(zonos(p, CLONE_VOICE)),
        SynthesisParams::CreateSpark(p) => ControlParameters::Spark(spark_create(p)),
        SynthesisParams::CreateZonos(p) => ControlParameters::Zonos(zonos(p, ZONOS_VOICE)),
        SynthesisParams::CreateKokoro(p) => ControlParameters::Kokoro(kokoro(p)),
        SynthesisParams::CreateSesame(p) => ControlParameters::Dialogue(dialogue(p)),
        SynthesisParams::Transcribe(p) => ControlParameters::Transcription(transcription(p)),
    };

    AdaptedParameters {
        model_id: params.variant().model_id(),
        control,
    }
}

fn spark_clone(p: &SparkParams) -> SparkControl {
    SparkControl {
        voice: CLONE_VOICE.to_string(),
        format: OUTPUT_FORMAT.to_string(),
        pitch: p.pitch,
        speed: p.speed,
    }
}

fn spark_create(p: &SparkVoiceParams) -> SparkControl {
    let voice = match p.gender {
        Gender::Male => MALE_VOICE,
        Gender::Female => FEMALE_VOICE,
    };
    SparkControl {
        voice: voice.to_string(),
        format: OUTPUT_FORMAT.to_string(),
        pitch: p.pitch,
        speed: p.speed,
    }
}

fn zonos(p: &ZonosParams, voice: &str) -> ZonosControl {
    ZonosControl {
        voice: voice.to_string(),
        format: OUTPUT_FORMAT.to_string(),
        pitch_std: p.pitch_std,
        speaking_rate: p.speaking_rate,
        emotion: p.emotion,
    }
}

fn kokoro(p: &KokoroParams) -> KokoroControl {
    KokoroControl {
        voice: p.voice.clone(),
        format: OUTPUT_FORMAT.to_string(),
        lang_code: p.lang_code.clone(),
        speed: p.speed,
    }
}

fn dialogue(p: &SesameParams) -> DialogueControl {
    // 先剔除空轮次，再同时构造两个并行数组，保证下标对齐
    let (speakers, max_audio_lens) = p
        .conversation
        .surviving()
        .map(|t| (t.speaker_id, t.max_audio_len))
        .unzip();

    DialogueControl {
        speakers,
        format: OUTPUT_FORMAT.to_string(),
        temperature: p.temperature,
        min_probability: p.min_probability,
        max_audio_lens,
    }
}

fn transcription(p: &TranscribeParams) -> TranscriptionControl {
    TranscriptionControl {
        word_timestamps: p.word_timestamps,
        model_repo: p.model_repo.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Conversation, ConversationTurn};
    use serde_json::json;

    #[test]
    fn test_clone_spark() {
        let adapted = adapt(&SynthesisParams::CloneSpark(SparkParams { pitch: 3, speed: 3 }));
        assert_eq!(adapted.model_id, "spark-tts");
        assert_eq!(
            serde_json::to_value(&adapted.control).unwrap(),
            json!({"voice": "clone", "format": "wav", "pitch": 3, "speed": 3})
        );
    }

    #[test]
    fn test_create_spark_gender_voices() {
        let male = adapt(&SynthesisParams::CreateSpark(SparkVoiceParams {
            gender: Gender::Male,
            pitch: 2,
            speed: 4,
        }));
        let female = adapt(&SynthesisParams::CreateSpark(SparkVoiceParams {
            gender: Gender::Female,
            pitch: 2,
            speed: 4,
        }));

        assert_eq!(serde_json::to_value(&male.control).unwrap()["voice"], "alloy");
        assert_eq!(serde_json::to_value(&female.control).unwrap()["voice"], "shimmer");
    }

    #[test]
    fn test_zonos_voice_depends_on_form() {
        let params = ZonosParams {
            pitch_std: 120,
            speaking_rate: 15,
            emotion: Emotion::Happy,
        };
        let clone = adapt(&SynthesisParams::CloneZonos(params.clone()));
        let create = adapt(&SynthesisParams::CreateZonos(params));

        assert_eq!(
            serde_json::to_value(&clone.control).unwrap(),
            json!({
                "voice": "clone",
                "format": "wav",
                "pitch_std": 120,
                "speaking_rate": 15,
                "emotion": "happy"
            })
        );
        assert_eq!(serde_json::to_value(&create.control).unwrap()["voice"], "zonos");
        assert_eq!(create.model_id, "zonos");
    }

    #[test]
    fn test_kokoro() {
        let adapted = adapt(&SynthesisParams::CreateKokoro(KokoroParams {
            voice: "am_soul".to_string(),
            lang_code: "j".to_string(),
            speed: 1.5,
        }));
        assert_eq!(adapted.model_id, "kokoro-tts");
        assert_eq!(
            serde_json::to_value(&adapted.control).unwrap(),
            json!({"voice": "am_soul", "format": "wav", "lang_code": "j", "speed": 1.5})
        );
    }

    #[test]
    fn test_dialogue_filters_and_reindexes() {
        let params = SesameParams {
            conversation: Conversation::new(vec![
                ConversationTurn::new("", 1, 3000),
                ConversationTurn::new("Hi", 2, 3000),
                ConversationTurn::new("   ", 3, 1000),
                ConversationTurn::new("Bye", 5, 1500),
            ]),
            temperature: 0.5,
            min_probability: 0.25,
        };
        let adapted = adapt(&SynthesisParams::CreateSesame(params));

        assert_eq!(adapted.model_id, "csm-1b");
        assert_eq!(
            serde_json::to_value(&adapted.control).unwrap(),
            json!({
                "speakers": [2, 5],
                "format": "wav",
                "temp": 0.5,
                "min_p": 0.25,
                "max_audio_lens": [3000, 1500]
            })
        );
    }

    #[test]
    fn test_transcription_repo_forwarded_verbatim() {
        let repo = "  Some-Org/Weird Repo@rev ";
        let adapted = adapt(&SynthesisParams::Transcribe(TranscribeParams {
            word_timestamps: false,
            model_repo: repo.to_string(),
        }));
        assert_eq!(adapted.model_id, "whisper");
        assert_eq!(
            serde_json::to_value(&adapted.control).unwrap(),
            json!({"word_timestamps": false, "model_repo": repo})
        );
    }

    #[test]
    fn test_adapt_is_idempotent() {
        let params = SynthesisParams::CreateSesame(SesameParams::default());
        assert_eq!(adapt(&params), adapt(&params));
    }
}
