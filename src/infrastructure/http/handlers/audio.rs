//! Audio Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ResourceId;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 下载已登记的音频资源；资源被释放后返回 404
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(resource_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let id = ResourceId::from_uuid(resource_id);
    let audio = state
        .resources
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Audio resource not found: {}", id)))?;

    Ok((
        [
            (header::CONTENT_TYPE, audio.subtype.mime_type()),
            (header::CONTENT_LENGTH, audio.bytes.len().to_string()),
        ],
        Body::from(audio.bytes.to_vec()),
    )
        .into_response())
}
