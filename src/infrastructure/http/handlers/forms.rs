//! Form Handlers - 克隆 / 创建 / 转写
//!
//! 每个表单同一时刻只有一个操作；请求会等待操作结束后返回快照

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::application::{OperationRequest, TriggerOutcome};
use crate::domain::{AudioInput, Form, MediaSubtype};
use crate::infrastructure::http::dto::{
    ApiResponse, CloneRequestDto, CreateRequestDto, SnapshotDto, TranscribeRequestDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// multipart 表单：`request`（JSON）+ 可选 `file`
struct FormUpload {
    request: Option<String>,
    file: Option<AudioInput>,
}

async fn read_upload(mut multipart: Multipart) -> Result<FormUpload, ApiError> {
    let mut request: Option<String> = None;
    let mut file: Option<AudioInput> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "request" => {
                request = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read request: {}", e))
                })?);
            }
            "file" => {
                // 优先使用声明的 MIME 类型，其次文件扩展名
                let subtype = match field.content_type() {
                    Some(mime) => MediaSubtype::from_mime(Some(mime)),
                    None => field
                        .file_name()
                        .and_then(MediaSubtype::from_file_name)
                        .unwrap_or_default(),
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec();
                file = Some(AudioInput::new(bytes, subtype));
            }
            _ => {}
        }
    }

    Ok(FormUpload { request, file })
}

fn parse_request<T: DeserializeOwned>(raw: &str) -> Result<T, ApiError> {
    serde_json::from_str(raw).map_err(|e| ApiError::BadRequest(format!("Invalid request: {}", e)))
}

async fn run(state: &AppState, request: OperationRequest) -> Result<Json<ApiResponse<SnapshotDto>>, ApiError> {
    match state.studio.trigger(request).await? {
        TriggerOutcome::Settled(snapshot) => Ok(Json(ApiResponse::success(snapshot.into()))),
        TriggerOutcome::Superseded { operation_id } => Err(ApiError::Conflict(format!(
            "Operation {} superseded by a newer request",
            operation_id
        ))),
    }
}

/// 声音克隆
pub async fn clone_generate(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<SnapshotDto>>, ApiError> {
    let upload = read_upload(multipart).await?;
    let raw = upload
        .request
        .ok_or_else(|| ApiError::BadRequest("Request field is required".to_string()))?;
    let dto: CloneRequestDto = parse_request(&raw)?;
    // 空文件等同于未选择参考音频
    let reference_audio = upload.file.filter(|a| !a.is_empty());

    tracing::info!(
        model = ?dto.model,
        text_len = dto.text.len(),
        has_reference_audio = reference_audio.is_some(),
        "Clone requested"
    );

    let request = dto.into_request(reference_audio)?;
    run(&state, request).await
}

/// 声音创建
pub async fn create_generate(
    State(state): State<Arc<AppState>>,
    Json(dto): Json<CreateRequestDto>,
) -> Result<Json<ApiResponse<SnapshotDto>>, ApiError> {
    tracing::info!(model = ?dto.model, text_len = dto.text.len(), "Create requested");

    let request = dto.into_request()?;
    run(&state, request).await
}

/// 语音转写
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<SnapshotDto>>, ApiError> {
    let upload = read_upload(multipart).await?;
    let dto: TranscribeRequestDto = match upload.request {
        Some(raw) => parse_request(&raw)?,
        None => TranscribeRequestDto::default(),
    };
    let audio = upload
        .file
        .ok_or_else(|| ApiError::BadRequest("Audio file is required".to_string()))?;

    tracing::info!(
        model_repo = %dto.model_repo,
        word_timestamps = dto.word_timestamps,
        audio_size = audio.bytes.len(),
        "Transcription requested"
    );

    let request = dto.into_request(audio)?;
    run(&state, request).await
}

async fn form_state(state: &AppState, form: Form) -> Json<ApiResponse<SnapshotDto>> {
    let snapshot = state.studio.controller(form).snapshot().await;
    Json(ApiResponse::success(snapshot.into()))
}

pub async fn clone_state(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SnapshotDto>> {
    form_state(&state, Form::Clone).await
}

pub async fn create_state(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SnapshotDto>> {
    form_state(&state, Form::Create).await
}

pub async fn transcribe_state(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SnapshotDto>> {
    form_state(&state, Form::Transcribe).await
}
