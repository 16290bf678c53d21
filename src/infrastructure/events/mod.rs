//! Events - WebSocket 事件发布

mod publisher;

pub use publisher::{audio_url, EventPublisher, StudioEvent};
