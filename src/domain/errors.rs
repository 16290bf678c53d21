//! Domain Errors

use thiserror::Error;

/// 参数校验错误
///
/// 由 UI 侧边界（HTTP 门面）在调用适配器之前检查；适配器本身不做范围裁剪
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{field} out of range: {value} (expected {range})")]
    OutOfRange {
        field: &'static str,
        value: String,
        range: &'static str,
    },

    #[error("{field} must be a multiple of {step}: {value}")]
    OffStep {
        field: &'static str,
        value: u16,
        step: u16,
    },

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("Turn index {index} out of bounds (len {len})")]
    TurnIndex { index: usize, len: usize },
}

impl ParamError {
    pub fn out_of_range(
        field: &'static str,
        value: impl std::fmt::Display,
        range: &'static str,
    ) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            range,
        }
    }
}
