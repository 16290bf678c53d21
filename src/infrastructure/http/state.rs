//! Application State

use std::sync::Arc;

use crate::application::{AudioResourcePort, SpeechStudio, SpeechTransportPort};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub transport: Arc<dyn SpeechTransportPort>,
    pub resources: Arc<dyn AudioResourcePort>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Forms ==========
    pub studio: SpeechStudio,
}

impl AppState {
    pub fn new(
        transport: Arc<dyn SpeechTransportPort>,
        resources: Arc<dyn AudioResourcePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            transport: transport.clone(),
            resources: resources.clone(),
            event_publisher: event_publisher.clone(),
            studio: SpeechStudio::new(transport, resources, event_publisher),
        }
    }
}
