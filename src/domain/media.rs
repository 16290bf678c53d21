//! Media - 媒体子类型、输入音频与参考样本

use serde::{Deserialize, Serialize};

/// 未声明子类型时的回退值
pub const DEFAULT_SUBTYPE: &str = "wav";

/// 音频媒体子类型（`audio/<subtype>` 中斜杠后的部分）
///
/// 不变量: 非空、小写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaSubtype(String);

impl MediaSubtype {
    /// 空白输入回退为 `wav`
    pub fn new(subtype: impl AsRef<str>) -> Self {
        let s = subtype.as_ref().trim().to_lowercase();
        if s.is_empty() {
            Self::wav()
        } else {
            Self(s)
        }
    }

    pub fn wav() -> Self {
        Self(DEFAULT_SUBTYPE.to_string())
    }

    /// 从 MIME 类型解析，例如 `audio/mpeg` -> `mpeg`
    ///
    /// 缺失、无斜杠或斜杠后为空时回退为 `wav`；参数部分（`;` 之后）被忽略
    pub fn from_mime(mime: Option<&str>) -> Self {
        mime.and_then(|m| m.split(';').next())
            .and_then(|m| m.split('/').nth(1))
            .map(Self::new)
            .unwrap_or_else(Self::wav)
    }

    /// 从文件名扩展名推断
    pub fn from_file_name(name: &str) -> Option<Self> {
        std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 完整 MIME 类型
    pub fn mime_type(&self) -> String {
        format!("audio/{}", self.0)
    }
}

impl Default for MediaSubtype {
    fn default() -> Self {
        Self::wav()
    }
}

impl std::fmt::Display for MediaSubtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 上传的原始音频及其声明的子类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInput {
    pub bytes: Vec<u8>,
    pub subtype: MediaSubtype,
}

impl AudioInput {
    pub fn new(bytes: Vec<u8>, subtype: MediaSubtype) -> Self {
        Self { bytes, subtype }
    }

    pub fn from_upload(bytes: Vec<u8>, mime: Option<&str>) -> Self {
        Self::new(bytes, MediaSubtype::from_mime(mime))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 克隆用参考样本：可选参考文本 + 可选参考音频
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSample {
    pub text: Option<String>,
    pub audio: Option<AudioInput>,
}

impl ReferenceSample {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_audio(mut self, audio: AudioInput) -> Self {
        self.audio = Some(audio);
        self
    }

    /// 非空的参考文本
    pub fn reference_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}
