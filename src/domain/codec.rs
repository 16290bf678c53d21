//! Audio Codec - 二进制音频与文本传输编码互转
//!
//! 传输编码为标准 base64（带填充），逐字节可逆。
//! 解码失败返回错误，绝不截断或替换数据。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::media::MediaSubtype;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed audio payload: {0}")]
    Malformed(#[from] base64::DecodeError),
}

/// 二进制 -> 传输文本
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// 传输文本 -> 二进制
///
/// 仅容忍首尾空白，内部任何非法字符都视为损坏
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(STANDARD.decode(text.trim())?)
}

/// 可播放资源标识（进程内有效）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(Uuid);

impl ResourceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 可播放资源句柄
///
/// 字节本身由 AudioResourcePort 持有；句柄被新操作取代时必须释放
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayableResource {
    pub id: ResourceId,
    pub subtype: MediaSubtype,
    pub size_bytes: usize,
}

impl PlayableResource {
    pub fn mime_type(&self) -> String {
        self.subtype.mime_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255u8).chain([0, 0, 0x80, 0xff]).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_empty_and_odd_lengths() {
        for len in 0..8 {
            let bytes = vec![0xAB; len];
            assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_known_encoding() {
        assert_eq!(encode(b"RIFF"), "UklGRg==");
        assert_eq!(decode("UklGRg==").unwrap(), b"RIFF");
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(decode("not base64!").is_err());
        // 缺少填充
        assert!(decode("UklGRg").is_err());
        // 内部空白
        assert!(decode("Ukl GRg==").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(decode("  UklGRg==\n").unwrap(), b"RIFF");
    }
}
