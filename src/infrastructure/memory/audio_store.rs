//! In-Memory Audio Store Implementation

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{AudioResourcePort, StoredAudio};
use crate::domain::{MediaSubtype, PlayableResource, ResourceId};

/// 内存音频资源表
pub struct InMemoryAudioStore {
    /// resource_id -> audio
    entries: DashMap<ResourceId, StoredAudio>,
}

impl InMemoryAudioStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// 当前持有的字节总数
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|e| e.bytes.len()).sum()
    }
}

impl Default for InMemoryAudioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioResourcePort for InMemoryAudioStore {
    fn to_playable_resource(&self, bytes: Vec<u8>, subtype: MediaSubtype) -> PlayableResource {
        let id = ResourceId::new();
        let resource = PlayableResource {
            id,
            subtype: subtype.clone(),
            size_bytes: bytes.len(),
        };

        self.entries.insert(
            id,
            StoredAudio {
                bytes: Arc::from(bytes),
                subtype,
            },
        );

        tracing::debug!(
            resource_id = %id,
            size = resource.size_bytes,
            subtype = %resource.subtype,
            "Audio resource registered"
        );
        resource
    }

    fn get(&self, id: &ResourceId) -> Option<StoredAudio> {
        self.entries.get(id).map(|e| e.value().clone())
    }

    fn release(&self, id: &ResourceId) -> bool {
        let released = self.entries.remove(id).is_some();
        if released {
            tracing::debug!(resource_id = %id, "Audio resource released");
        }
        released
    }

    fn count(&self) -> usize {
        self.entries.len()
    }
}
