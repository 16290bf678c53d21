//! Request Composer - 组装协议信封
//!
//! 消息顺序即调用方可见的文本/轮次顺序，组装过程从不重排

use super::adapter::AdaptedParameters;
use super::envelope::{ContentPart, InlineAudio, MessageEntry, Modality, ProtocolEnvelope};
use super::operation::OperationRequest;
use crate::domain::{codec, AudioInput, BackendVariant, SynthesisParams};

/// 由请求与适配后的参数构造信封
pub fn compose(request: &OperationRequest, adapted: AdaptedParameters) -> ProtocolEnvelope {
    let variant = request.variant();

    let messages = match &request.params {
        SynthesisParams::CloneSpark(_) | SynthesisParams::CloneZonos(_) => clone_messages(request),
        SynthesisParams::CreateSpark(_)
        | SynthesisParams::CreateZonos(_)
        | SynthesisParams::CreateKokoro(_) => {
            vec![MessageEntry::user_parts(vec![ContentPart::text(&request.text)])]
        }
        SynthesisParams::CreateSesame(p) => p
            .conversation
            .surviving()
            .map(|turn| MessageEntry::user_text(&turn.text))
            .collect(),
        SynthesisParams::Transcribe(_) => {
            let parts = request.input_audio.iter().map(inline_audio).collect();
            vec![MessageEntry::user_parts(parts)]
        }
    };

    ProtocolEnvelope {
        model: adapted.model_id.to_string(),
        modalities: modalities(variant),
        audio: adapted.control,
        messages,
    }
}

/// 对话变体不声明模态
fn modalities(variant: BackendVariant) -> Option<Vec<Modality>> {
    match variant {
        BackendVariant::Transcribe => Some(vec![Modality::Audio]),
        BackendVariant::CreateSesame => None,
        _ => Some(vec![Modality::Text, Modality::Audio]),
    }
}

/// 克隆：可选的参考文本消息在前，主文本（附带可选参考音频）在后
fn clone_messages(request: &OperationRequest) -> Vec<MessageEntry> {
    let mut messages = Vec::with_capacity(2);

    if let Some(reference_text) = request.reference.reference_text() {
        messages.push(MessageEntry::user_parts(vec![ContentPart::text(reference_text)]));
    }

    let mut parts = vec![ContentPart::text(&request.text)];
    if let Some(audio) = &request.reference.audio {
        parts.push(inline_audio(audio));
    }
    messages.push(MessageEntry::user_parts(parts));

    messages
}

fn inline_audio(audio: &AudioInput) -> ContentPart {
    ContentPart::InputAudio {
        input_audio: InlineAudio {
            data: codec::encode(&audio.bytes),
            format: audio.subtype.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::adapter::adapt;
    use crate::application::envelope::MessageBody;
    use crate::domain::{
        Conversation, ConversationTurn, KokoroParams, MediaSubtype, ReferenceSample,
        SesameParams, SparkParams, TranscribeParams,
    };
    use serde_json::json;

    fn build(request: &OperationRequest) -> ProtocolEnvelope {
        compose(request, adapt(&request.params))
    }

    #[test]
    fn test_clone_without_reference() {
        let request = OperationRequest::voice_clone(
            "Hello world",
            ReferenceSample::none(),
            SynthesisParams::CloneSpark(SparkParams { pitch: 3, speed: 3 }),
        );
        let envelope = build(&request);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "model": "spark-tts",
                "modalities": ["text", "audio"],
                "audio": {"voice": "clone", "format": "wav", "pitch": 3, "speed": 3},
                "messages": [
                    {"role": "user", "content": [{"type": "text", "text": "Hello world"}]}
                ]
            })
        );
    }

    #[test]
    fn test_clone_with_reference_text_and_audio() {
        let reference = ReferenceSample::none()
            .with_text("reference words")
            .with_audio(AudioInput::new(vec![0, 1, 0xff], MediaSubtype::new("mpeg")));
        let request = OperationRequest::voice_clone(
            "target",
            reference,
            SynthesisParams::CloneSpark(SparkParams::default()),
        );
        let envelope = build(&request);

        assert_eq!(envelope.messages.len(), 2);
        assert_eq!(
            serde_json::to_value(&envelope.messages).unwrap(),
            json!([
                {"role": "user", "content": [{"type": "text", "text": "reference words"}]},
                {"role": "user", "content": [
                    {"type": "text", "text": "target"},
                    {"type": "input_audio", "input_audio": {"data": "AAH/", "format": "mpeg"}}
                ]}
            ])
        );
    }

    #[test]
    fn test_clone_empty_reference_text_is_skipped() {
        let request = OperationRequest::voice_clone(
            "target",
            ReferenceSample::none().with_text(""),
            SynthesisParams::CloneSpark(SparkParams::default()),
        );
        assert_eq!(build(&request).messages.len(), 1);
    }

    #[test]
    fn test_create_single_text_message() {
        let request = OperationRequest::voice_create(
            "Speak",
            SynthesisParams::CreateKokoro(KokoroParams::default()),
        );
        let envelope = build(&request);

        assert_eq!(envelope.model, "kokoro-tts");
        assert_eq!(envelope.modalities, Some(vec![Modality::Text, Modality::Audio]));
        assert_eq!(
            envelope.messages,
            vec![MessageEntry::user_parts(vec![ContentPart::text("Speak")])]
        );
    }

    #[test]
    fn test_dialogue_messages_align_with_control_arrays() {
        let params = SesameParams {
            conversation: Conversation::new(vec![
                ConversationTurn::new("", 1, 3000),
                ConversationTurn::new("Hi", 2, 3000),
            ]),
            ..SesameParams::default()
        };
        let request =
            OperationRequest::voice_create("", SynthesisParams::CreateSesame(params));
        let value = serde_json::to_value(build(&request)).unwrap();

        assert!(value.get("modalities").is_none());
        assert_eq!(value["model"], "csm-1b");
        assert_eq!(value["messages"], json!([{"role": "user", "text": "Hi"}]));
        assert_eq!(value["audio"]["speakers"], json!([2]));
        assert_eq!(value["audio"]["max_audio_lens"], json!([3000]));
    }

    #[test]
    fn test_dialogue_preserves_turn_order() {
        let turns: Vec<ConversationTurn> = (0..6)
            .map(|i| {
                let text = if i % 2 == 0 { format!("turn {}", i) } else { String::new() };
                ConversationTurn::new(text, (i % 5 + 1) as u8, 1000 + i as u32)
            })
            .collect();
        let params = SesameParams {
            conversation: Conversation::new(turns),
            ..SesameParams::default()
        };
        let request =
            OperationRequest::voice_create("", SynthesisParams::CreateSesame(params));
        let envelope = build(&request);

        let texts: Vec<String> = envelope
            .messages
            .iter()
            .map(|m| match &m.body {
                MessageBody::Text(t) => t.clone(),
                MessageBody::Content(_) => panic!("dialogue messages carry plain text"),
            })
            .collect();
        assert_eq!(texts, vec!["turn 0", "turn 2", "turn 4"]);

        let audio = serde_json::to_value(&envelope.audio).unwrap();
        assert_eq!(audio["speakers"], json!([1, 3, 5]));
        assert_eq!(audio["max_audio_lens"], json!([1000, 1002, 1004]));
    }

    #[test]
    fn test_transcription_message() {
        let request = OperationRequest::transcription(
            AudioInput::from_upload(b"RIFF".to_vec(), Some("audio/wav")),
            TranscribeParams::default(),
        );
        let value = serde_json::to_value(build(&request)).unwrap();

        assert_eq!(value["model"], "whisper");
        assert_eq!(value["modalities"], json!(["audio"]));
        assert_eq!(
            value["audio"],
            json!({"word_timestamps": true, "model_repo": "mlx-community/whisper-large-v3-turbo"})
        );
        assert_eq!(
            value["messages"],
            json!([{"role": "user", "content": [
                {"type": "input_audio", "input_audio": {"data": "UklGRg==", "format": "wav"}}
            ]}])
        );
    }
}
