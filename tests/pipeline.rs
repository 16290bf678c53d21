//! 端到端管线测试：适配 -> 组装 -> 传输（Fake）-> 归一化 -> 生命周期

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use voxstudio::application::{
    AudioResourcePort, LifecycleState, OperationError, OperationRequest, OperationResult, SpeechStudio,
    TriggerOutcome,
};
use voxstudio::domain::{
    codec, AudioInput, Conversation, ConversationTurn, Form, KokoroParams, ReferenceSample,
    SesameParams, SparkParams, SynthesisParams, TranscribeParams,
};
use voxstudio::infrastructure::adapters::{silent_wav, FakeSpeechClient};
use voxstudio::infrastructure::events::EventPublisher;
use voxstudio::infrastructure::memory::InMemoryAudioStore;

struct Fixture {
    transport: Arc<FakeSpeechClient>,
    resources: Arc<InMemoryAudioStore>,
    studio: SpeechStudio,
}

fn fixture(transport: FakeSpeechClient) -> Fixture {
    let transport = Arc::new(transport);
    let resources = Arc::new(InMemoryAudioStore::new());
    let studio = SpeechStudio::new(
        transport.clone(),
        resources.clone(),
        Arc::new(EventPublisher::new()),
    );
    Fixture {
        transport,
        resources,
        studio,
    }
}

fn settled(outcome: TriggerOutcome) -> voxstudio::application::OperationSnapshot {
    match outcome {
        TriggerOutcome::Settled(snapshot) => snapshot,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn clone_spark_hello_world() {
    let f = fixture(FakeSpeechClient::new().with_reply(json!({
        "choices": [{"message": {"audio": {"data": codec::encode(&silent_wav())}}}]
    })));

    let request = OperationRequest::voice_clone(
        "Hello world",
        ReferenceSample::none(),
        SynthesisParams::CloneSpark(SparkParams { pitch: 3, speed: 3 }),
    );
    let snapshot = settled(f.studio.trigger(request).await.unwrap());

    let sent = f.transport.requests();
    assert_eq!(sent.len(), 1);
    let envelope = &sent[0];
    assert_eq!(envelope["model"], "spark-tts");
    assert_eq!(
        envelope["audio"],
        json!({"voice": "clone", "format": "wav", "pitch": 3, "speed": 3})
    );
    let messages = envelope["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0]["content"],
        json!([{"type": "text", "text": "Hello world"}])
    );

    let resource = snapshot.resource().unwrap();
    assert_eq!(resource.size_bytes, 44);
    assert_eq!(f.resources.get(&resource.id).unwrap().bytes.len(), 44);
}

#[tokio::test]
async fn dialogue_drops_blank_turns() {
    let f = fixture(FakeSpeechClient::new());

    let params = SesameParams {
        conversation: Conversation::new(vec![
            ConversationTurn::new("", 1, 3000),
            ConversationTurn::new("Hi", 2, 3000),
        ]),
        ..SesameParams::default()
    };
    let request = OperationRequest::voice_create("", SynthesisParams::CreateSesame(params));
    let snapshot = settled(f.studio.trigger(request).await.unwrap());

    let envelope = &f.transport.requests()[0];
    assert_eq!(envelope["model"], "csm-1b");
    assert!(envelope.get("modalities").is_none());
    assert_eq!(envelope["messages"], json!([{"role": "user", "text": "Hi"}]));
    assert_eq!(envelope["audio"]["speakers"], json!([2]));
    assert_eq!(envelope["audio"]["max_audio_lens"], json!([3000]));
    assert_eq!(envelope["audio"]["temp"], json!(0.2));
    assert_eq!(envelope["audio"]["min_p"], json!(0.8));

    // 对话回复取顶层 combined_audio
    assert_eq!(snapshot.resource().unwrap().size_bytes, 44);
}

#[tokio::test]
async fn dialogue_alignment_with_many_turns() {
    let f = fixture(FakeSpeechClient::new());
    let turns = vec![
        ConversationTurn::new("one", 1, 1000),
        ConversationTurn::new("  ", 2, 2000),
        ConversationTurn::new("three", 3, 3000),
        ConversationTurn::new("", 4, 4000),
        ConversationTurn::new("five", 5, 5000),
    ];
    let params = SesameParams {
        conversation: Conversation::new(turns),
        ..SesameParams::default()
    };
    f.studio
        .trigger(OperationRequest::voice_create(
            "",
            SynthesisParams::CreateSesame(params),
        ))
        .await
        .unwrap();

    let envelope = &f.transport.requests()[0];
    let texts: Vec<&str> = envelope["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["one", "three", "five"]);
    assert_eq!(envelope["audio"]["speakers"], json!([1, 3, 5]));
    assert_eq!(envelope["audio"]["max_audio_lens"], json!([1000, 3000, 5000]));
}

#[tokio::test]
async fn empty_text_never_leaves_idle() {
    let f = fixture(FakeSpeechClient::new());

    for text in ["", "   ", "\n\t"] {
        let request = OperationRequest::voice_create(
            text,
            SynthesisParams::CreateKokoro(KokoroParams::default()),
        );
        assert!(matches!(
            f.studio.trigger(request).await,
            Err(OperationError::InvalidTrigger(_))
        ));
    }

    assert_eq!(f.transport.call_count(), 0);
    assert_eq!(
        f.studio.controller(Form::Create).snapshot().await.state,
        LifecycleState::Idle
    );
}

#[tokio::test]
async fn stale_reply_does_not_overwrite_newer_operation() {
    let slow = json!({"choices": [{"message": {"audio": {"data": codec::encode(b"slow")}}}]});
    let fast = json!({"choices": [{"message": {"audio": {"data": codec::encode(b"fast")}}}]});
    let f = Arc::new(fixture(
        FakeSpeechClient::new()
            .with_reply_after(slow, Duration::from_millis(300))
            .with_reply(fast),
    ));

    let first = {
        let f = f.clone();
        tokio::spawn(async move {
            f.studio
                .trigger(OperationRequest::voice_create(
                    "first",
                    SynthesisParams::CreateKokoro(KokoroParams::default()),
                ))
                .await
        })
    };
    while f.transport.call_count() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let second = settled(
        f.studio
            .trigger(OperationRequest::voice_create(
                "second",
                SynthesisParams::CreateKokoro(KokoroParams::default()),
            ))
            .await
            .unwrap(),
    );
    let first = first.await.unwrap().unwrap();

    assert!(matches!(first, TriggerOutcome::Superseded { .. }));
    let current = f.studio.controller(Form::Create).snapshot().await;
    assert_eq!(current.operation_id, second.operation_id);
    let resource = current.resource().unwrap();
    assert_eq!(&*f.resources.get(&resource.id).unwrap().bytes, b"fast");
    assert_eq!(f.resources.count(), 1);
}

#[tokio::test]
async fn transcript_timings_are_ordered() {
    let f = fixture(FakeSpeechClient::new().with_reply(json!({
        "choices": [{"message": {
            "content": "a quick test",
            "word_timestamps": [
                {"word": "test", "start": 0.9, "end": 1.3},
                {"word": "a", "start": 0.0, "end": 0.1},
                {"word": "quick", "start": 0.2, "end": 0.1}
            ]
        }}]
    })));

    let request = OperationRequest::transcription(
        AudioInput::from_upload(b"fLaC".to_vec(), Some("audio/flac")),
        TranscribeParams::default(),
    );
    let snapshot = settled(f.studio.trigger(request).await.unwrap());

    let envelope = &f.transport.requests()[0];
    assert_eq!(envelope["model"], "whisper");
    assert_eq!(envelope["modalities"], json!(["audio"]));
    assert_eq!(
        envelope["messages"][0]["content"][0]["input_audio"]["format"],
        "flac"
    );
    assert_eq!(envelope["audio"]["word_timestamps"], true);

    match snapshot.result {
        Some(OperationResult::Transcript { text, word_timings }) => {
            assert_eq!(text, "a quick test");
            let timings = word_timings.unwrap();
            let words: Vec<&str> = timings.as_slice().iter().map(|t| t.word.as_str()).collect();
            assert_eq!(words, vec!["a", "quick", "test"]);
            assert!(timings.as_slice().iter().all(|t| t.start <= t.end));
            assert!(timings
                .as_slice()
                .windows(2)
                .all(|w| w[0].start <= w[1].start));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_audio_fails_without_resource() {
    let f = fixture(FakeSpeechClient::new().with_reply(json!({
        "choices": [{"message": {"audio": {"data": "***"}}}]
    })));

    let request = OperationRequest::voice_clone(
        "hi",
        ReferenceSample::none().with_text("reference words"),
        SynthesisParams::CloneSpark(SparkParams::default()),
    );
    let result = f.studio.trigger(request).await;

    assert!(matches!(result, Err(OperationError::MalformedAudioPayload(_))));
    assert_eq!(f.resources.count(), 0);
    assert_eq!(
        f.studio.controller(Form::Clone).snapshot().await.state,
        LifecycleState::Failed
    );

    // 参考文本单独作为第一条消息
    let messages = f.transport.requests()[0]["messages"].clone();
    assert_eq!(messages.as_array().unwrap().len(), 2);
    assert_eq!(messages[0]["content"][0]["text"], "reference words");
}
