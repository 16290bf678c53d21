//! Operation Lifecycle Controller - 单表单单操作状态机
//!
//! idle -> in_flight -> (succeeded | failed)，终态可再次触发回到 in_flight。
//!
//! - 触发前检查最小内容前置条件，不满足则不改变状态、不发送请求
//! - 进入 in_flight 时释放上一次的音频资源
//! - 只有传输调用会挂起；状态锁从不跨越该调用持有
//! - 同表单的新触发会取代旧操作，旧操作迟到的回复被丢弃

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::adapter::adapt;
use super::composer::compose;
use super::error::OperationError;
use super::normalizer::{normalize, ReplyShape};
use super::operation::{
    LifecycleState, OperationRequest, OperationResult, OperationSnapshot, TriggerOutcome,
};
use super::ports::{AudioResourcePort, OperationEventsPort, SpeechTransportPort};
use crate::domain::{BackendVariant, Form, NormalizedResult, SynthesisParams};

/// 检查触发的最小内容前置条件
pub fn check_trigger(form: Form, request: &OperationRequest) -> Result<(), OperationError> {
    let variant = request.variant();
    if variant.form() != form {
        return Err(OperationError::invalid_trigger(format!(
            "variant {} does not belong to the {} form",
            variant, form
        )));
    }

    match &request.params {
        SynthesisParams::CreateSesame(p) => {
            if !p.conversation.has_content() {
                return Err(OperationError::invalid_trigger(
                    "dialogue needs at least one turn with text",
                ));
            }
        }
        SynthesisParams::Transcribe(_) => {
            if !request.input_audio.as_ref().is_some_and(|a| !a.is_empty()) {
                return Err(OperationError::invalid_trigger("no input audio selected"));
            }
        }
        _ => {
            if request.text.trim().is_empty() {
                return Err(OperationError::invalid_trigger("text cannot be empty"));
            }
        }
    }

    Ok(())
}

/// 单个表单的操作控制器
///
/// 状态放在共享的 `FormSlot` 中，使进行中的请求可以脱离调用方独立收尾
pub struct FormController {
    slot: Arc<FormSlot>,
}

struct FormSlot {
    form: Form,
    transport: Arc<dyn SpeechTransportPort>,
    resources: Arc<dyn AudioResourcePort>,
    events: Arc<dyn OperationEventsPort>,
    current: Mutex<OperationSnapshot>,
}

impl FormController {
    pub fn new(
        form: Form,
        transport: Arc<dyn SpeechTransportPort>,
        resources: Arc<dyn AudioResourcePort>,
        events: Arc<dyn OperationEventsPort>,
    ) -> Self {
        Self {
            slot: Arc::new(FormSlot {
                form,
                transport,
                resources,
                events,
                current: Mutex::new(OperationSnapshot::idle(form)),
            }),
        }
    }

    pub fn form(&self) -> Form {
        self.slot.form
    }

    /// 当前操作快照
    pub async fn snapshot(&self) -> OperationSnapshot {
        self.slot.current.lock().await.clone()
    }

    /// 触发一次操作并等待其结束
    ///
    /// - 前置条件不满足: `Err(InvalidTrigger)`，状态不变
    /// - 成功: `Ok(Settled)`
    /// - 失败: 状态记为 failed 并返回对应错误
    /// - 回复到达前被取代: `Ok(Superseded)`，不触碰当前状态
    ///
    /// 进入 in_flight 之后的发送与收尾在独立任务中执行；
    /// 调用方提前放弃等待时操作依然会到达终态。
    pub async fn trigger(&self, request: OperationRequest) -> Result<TriggerOutcome, OperationError> {
        let form = self.slot.form;
        if let Err(e) = check_trigger(form, &request) {
            tracing::debug!(form = %form, error = %e, "Trigger rejected");
            return Err(e);
        }

        let variant = request.variant();
        let shape = ReplyShape::for_params(&request.params);
        let envelope = compose(&request, adapt(&request.params));

        let operation_id = self.slot.begin(variant).await;

        tracing::debug!(
            form = %form,
            operation_id = %operation_id,
            model = %envelope.model,
            messages = envelope.messages.len(),
            "Sending inference request"
        );

        let slot = self.slot.clone();
        let task = tokio::spawn(async move {
            let outcome = match slot.transport.send(&envelope).await {
                Ok(raw) => normalize(shape, &raw),
                Err(e) => Err(OperationError::from(e)),
            };
            slot.settle(operation_id, outcome).await
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    form = %form,
                    operation_id = %operation_id,
                    error = %e,
                    "Operation task aborted"
                );
                let failure =
                    OperationError::TransportFailure(format!("operation task aborted: {}", e));
                self.slot.settle(operation_id, Err(failure)).await
            }
        }
    }
}

impl FormSlot {
    /// 进入 in_flight，取代任何先前的操作
    async fn begin(&self, variant: BackendVariant) -> Uuid {
        let operation_id = Uuid::new_v4();
        let mut current = self.current.lock().await;

        if let Some(previous) = current.resource() {
            let released = self.resources.release(&previous.id);
            tracing::debug!(
                form = %self.form,
                resource_id = %previous.id,
                released = released,
                "Previous audio resource released"
            );
        }

        if current.state == LifecycleState::InFlight {
            tracing::info!(
                form = %self.form,
                superseded = ?current.operation_id,
                "Superseding in-flight operation"
            );
        }

        *current = OperationSnapshot {
            form: self.form,
            operation_id: Some(operation_id),
            variant: Some(variant),
            state: LifecycleState::InFlight,
            result: None,
            error: None,
            started_at: Some(Utc::now()),
            finished_at: None,
        };
        self.events.operation_started(&current);

        tracing::info!(
            form = %self.form,
            operation_id = %operation_id,
            variant = %variant,
            "Operation started"
        );
        operation_id
    }

    /// 记录结果；若已被取代则丢弃
    async fn settle(
        &self,
        operation_id: Uuid,
        outcome: Result<NormalizedResult, OperationError>,
    ) -> Result<TriggerOutcome, OperationError> {
        let mut current = self.current.lock().await;

        if current.operation_id != Some(operation_id) {
            tracing::info!(
                form = %self.form,
                operation_id = %operation_id,
                current = ?current.operation_id,
                "Discarding stale result"
            );
            return Ok(TriggerOutcome::Superseded { operation_id });
        }

        current.finished_at = Some(Utc::now());

        match outcome {
            Ok(NormalizedResult::Audio { bytes, subtype }) => {
                let resource = self.resources.to_playable_resource(bytes, subtype);
                current.state = LifecycleState::Succeeded;
                current.result = Some(OperationResult::Audio(resource.clone()));
                self.events.operation_settled(&current);
                self.events.start_playback(self.form, &resource);

                tracing::info!(
                    form = %self.form,
                    operation_id = %operation_id,
                    resource_id = %resource.id,
                    audio_size = resource.size_bytes,
                    "Operation succeeded"
                );
                Ok(TriggerOutcome::Settled(current.clone()))
            }
            Ok(NormalizedResult::Transcript { text, word_timings }) => {
                tracing::info!(
                    form = %self.form,
                    operation_id = %operation_id,
                    text_len = text.len(),
                    words = word_timings.as_ref().map(|w| w.len()),
                    "Operation succeeded"
                );
                current.state = LifecycleState::Succeeded;
                current.result = Some(OperationResult::Transcript { text, word_timings });
                self.events.operation_settled(&current);
                Ok(TriggerOutcome::Settled(current.clone()))
            }
            Err(e) => {
                tracing::warn!(
                    form = %self.form,
                    operation_id = %operation_id,
                    kind = e.kind(),
                    error = %e,
                    "Operation failed"
                );
                current.state = LifecycleState::Failed;
                current.error = Some(e.clone());
                self.events.operation_settled(&current);
                Err(e)
            }
        }
    }
}

/// 三个相互独立的表单
pub struct SpeechStudio {
    clone: FormController,
    create: FormController,
    transcribe: FormController,
}

impl SpeechStudio {
    pub fn new(
        transport: Arc<dyn SpeechTransportPort>,
        resources: Arc<dyn AudioResourcePort>,
        events: Arc<dyn OperationEventsPort>,
    ) -> Self {
        let controller =
            |form| FormController::new(form, transport.clone(), resources.clone(), events.clone());
        Self {
            clone: controller(Form::Clone),
            create: controller(Form::Create),
            transcribe: controller(Form::Transcribe),
        }
    }

    pub fn controller(&self, form: Form) -> &FormController {
        match form {
            Form::Clone => &self.clone,
            Form::Create => &self.create,
            Form::Transcribe => &self.transcribe,
        }
    }

    /// 按请求变体路由到所属表单
    pub async fn trigger(&self, request: OperationRequest) -> Result<TriggerOutcome, OperationError> {
        self.controller(request.variant().form()).trigger(request).await
    }
}
