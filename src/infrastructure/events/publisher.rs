//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现，同时承担自动播放通知

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::operation::{LifecycleState, OperationResult, OperationSnapshot};
use crate::application::ports::OperationEventsPort;
use crate::domain::{BackendVariant, Form, PlayableResource, ResourceId};

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum StudioEvent {
    /// 操作开始
    OperationStarted {
        form: Form,
        operation_id: Uuid,
        variant: BackendVariant,
    },
    /// 操作成功
    OperationSucceeded {
        form: Form,
        operation_id: Uuid,
        #[serde(skip_serializing_if = "Option::is_none")]
        resource_id: Option<ResourceId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    /// 操作失败
    OperationFailed {
        form: Form,
        operation_id: Uuid,
        kind: String,
        error: String,
    },
    /// 请求播放新生成的音频
    PlaybackRequested {
        form: Form,
        resource_id: ResourceId,
        url: String,
        media_type: String,
    },
}

/// 资源的下载路径
pub fn audio_url(id: &ResourceId) -> String {
    format!("/api/audio/{}", id)
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<StudioEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    /// 订阅全部事件
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.channel.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.channel.receiver_count()
    }

    fn publish(&self, event: StudioEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationEventsPort for EventPublisher {
    fn operation_started(&self, snapshot: &OperationSnapshot) {
        let (Some(operation_id), Some(variant)) = (snapshot.operation_id, snapshot.variant) else {
            return;
        };
        self.publish(StudioEvent::OperationStarted {
            form: snapshot.form,
            operation_id,
            variant,
        });
    }

    fn operation_settled(&self, snapshot: &OperationSnapshot) {
        let Some(operation_id) = snapshot.operation_id else {
            return;
        };

        let event = match (snapshot.state, &snapshot.result, &snapshot.error) {
            (LifecycleState::Failed, _, Some(error)) => StudioEvent::OperationFailed {
                form: snapshot.form,
                operation_id,
                kind: error.kind().to_string(),
                error: error.to_string(),
            },
            (LifecycleState::Succeeded, Some(OperationResult::Audio(resource)), _) => {
                StudioEvent::OperationSucceeded {
                    form: snapshot.form,
                    operation_id,
                    resource_id: Some(resource.id),
                    text: None,
                }
            }
            (LifecycleState::Succeeded, Some(OperationResult::Transcript { text, .. }), _) => {
                StudioEvent::OperationSucceeded {
                    form: snapshot.form,
                    operation_id,
                    resource_id: None,
                    text: Some(text.clone()),
                }
            }
            (state, _, _) => {
                tracing::warn!(
                    form = %snapshot.form,
                    state = state.as_str(),
                    "Settled snapshot without result or error"
                );
                return;
            }
        };
        self.publish(event);
    }

    fn start_playback(&self, form: Form, resource: &PlayableResource) {
        tracing::debug!(form = %form, resource_id = %resource.id, "Playback requested");
        self.publish(StudioEvent::PlaybackRequested {
            form,
            resource_id: resource.id,
            url: audio_url(&resource.id),
            media_type: resource.mime_type(),
        });
    }
}
