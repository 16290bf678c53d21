//! Response Normalizer - 将不同形态的回复归一化
//!
//! 三种回复形态:
//! - 单段合成: `choices[0].message.audio.data`
//! - 多说话人对话: 顶层 `combined_audio`
//! - 转写: `choices[0].message.content`，可选 `choices[0].message.word_timestamps`

use serde::Deserialize;
use serde_json::Value;

use super::error::OperationError;
use crate::domain::{codec, MediaSubtype, NormalizedResult, SynthesisParams, WordTiming, WordTimings};

/// 预期的回复形态，由变体（及转写是否请求时间戳）决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    SingleAudio,
    CombinedAudio,
    Transcript { word_timestamps: bool },
}

impl ReplyShape {
    pub fn for_params(params: &SynthesisParams) -> Self {
        match params {
            SynthesisParams::CreateSesame(_) => ReplyShape::CombinedAudio,
            SynthesisParams::Transcribe(p) => ReplyShape::Transcript {
                word_timestamps: p.word_timestamps,
            },
            _ => ReplyShape::SingleAudio,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawWordTiming {
    #[serde(default)]
    word: String,
    start: f64,
    end: f64,
}

/// 归一化原始回复
pub fn normalize(shape: ReplyShape, raw: &Value) -> Result<NormalizedResult, OperationError> {
    match shape {
        ReplyShape::SingleAudio => {
            let data = first_message(raw)
                .and_then(|m| m.get("audio"))
                .and_then(|a| a.get("data"));
            decode_audio(data, "choices[0].message.audio.data")
        }
        ReplyShape::CombinedAudio => decode_audio(raw.get("combined_audio"), "combined_audio"),
        ReplyShape::Transcript { word_timestamps } => {
            let message = first_message(raw);
            let text = message
                .and_then(|m| m.get("content"))
                .and_then(|c| c.as_str())
                .ok_or_else(|| OperationError::missing_payload("choices[0].message.content"))?
                .to_string();

            let word_timings = if word_timestamps {
                message
                    .and_then(|m| m.get("word_timestamps"))
                    .and_then(parse_word_timings)
            } else {
                None
            };

            Ok(NormalizedResult::Transcript { text, word_timings })
        }
    }
}

fn first_message(raw: &Value) -> Option<&Value> {
    raw.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c0| c0.get("message"))
}

fn decode_audio(data: Option<&Value>, field: &str) -> Result<NormalizedResult, OperationError> {
    let encoded = match data {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::String(_)) | Some(Value::Null) | None => {
            return Err(OperationError::missing_payload(field));
        }
        Some(other) => {
            return Err(OperationError::MalformedAudioPayload(format!(
                "{} is not a string: {}",
                field,
                type_name(other)
            )));
        }
    };

    let bytes = codec::decode(encoded)?;
    Ok(NormalizedResult::Audio {
        bytes,
        subtype: MediaSubtype::wav(),
    })
}

/// 时间戳缺失或不是数组时视为没有时间序列；单个无法解析的条目被跳过
fn parse_word_timings(value: &Value) -> Option<WordTimings> {
    let items = value.as_array()?;
    let timings: Vec<WordTiming> = items
        .iter()
        .filter_map(|item| match RawWordTiming::deserialize(item) {
            Ok(raw) => Some(WordTiming {
                word: raw.word,
                start: raw.start,
                end: raw.end,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable word timestamp entry");
                None
            }
        })
        .collect();
    Some(WordTimings::from_unordered(timings))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
