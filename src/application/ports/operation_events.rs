//! Operation Events Port - 操作状态通知与自动播放

use crate::application::operation::OperationSnapshot;
use crate::domain::{Form, PlayableResource};

/// Operation Events Port
///
/// 控制器在状态变化时同步调用，实现不得阻塞
pub trait OperationEventsPort: Send + Sync {
    /// 进入 in-flight
    fn operation_started(&self, snapshot: &OperationSnapshot);

    /// 进入 succeeded / failed
    fn operation_settled(&self, snapshot: &OperationSnapshot);

    /// 新音频结果的自动播放
    fn start_playback(&self, form: Form, resource: &PlayableResource);
}
