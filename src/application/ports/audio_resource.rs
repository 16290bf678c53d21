//! Audio Resource Port - 可播放音频资源
//!
//! 将解码后的字节包装成播放器可消费的资源句柄，并负责释放

use std::sync::Arc;

use crate::domain::{MediaSubtype, PlayableResource, ResourceId};

/// 已登记的音频
#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub bytes: Arc<[u8]>,
    pub subtype: MediaSubtype,
}

/// Audio Resource Port
///
/// 资源只在本进程内有效；被新操作取代时必须 release，避免重复操作造成泄漏
pub trait AudioResourcePort: Send + Sync {
    /// 登记字节并返回带媒体子类型的句柄
    fn to_playable_resource(&self, bytes: Vec<u8>, subtype: MediaSubtype) -> PlayableResource;

    /// 读取资源
    fn get(&self, id: &ResourceId) -> Option<StoredAudio>;

    /// 释放资源，返回是否确实存在
    fn release(&self, id: &ResourceId) -> bool;

    /// 当前持有的资源数
    fn count(&self) -> usize;
}
