//! Backend Variant - 后端变体与表单
//!
//! 变体决定参数结构与响应形态，一旦操作开始即不可变

use serde::{Deserialize, Serialize};

/// 表单
///
/// clone / create / transcribe 三个表单相互独立，各自持有一个 Operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    /// 声音克隆
    Clone,
    /// 声音创建
    Create,
    /// 语音转写
    Transcribe,
}

impl Form {
    pub fn as_str(&self) -> &'static str {
        match self {
            Form::Clone => "clone",
            Form::Create => "create",
            Form::Transcribe => "transcribe",
        }
    }
}

impl std::fmt::Display for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 后端变体（封闭枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendVariant {
    CloneSpark,
    CloneZonos,
    CreateSpark,
    CreateZonos,
    CreateKokoro,
    CreateSesame,
    Transcribe,
}

impl BackendVariant {
    /// 变体所属的表单
    pub fn form(&self) -> Form {
        match self {
            Self::CloneSpark | Self::CloneZonos => Form::Clone,
            Self::CreateSpark | Self::CreateZonos | Self::CreateKokoro | Self::CreateSesame => {
                Form::Create
            }
            Self::Transcribe => Form::Transcribe,
        }
    }

    /// 推理服务侧的模型标识
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::CloneSpark | Self::CreateSpark => "spark-tts",
            Self::CloneZonos | Self::CreateZonos => "zonos",
            Self::CreateKokoro => "kokoro-tts",
            Self::CreateSesame => "csm-1b",
            Self::Transcribe => "whisper",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloneSpark => "clone-spark",
            Self::CloneZonos => "clone-zonos",
            Self::CreateSpark => "create-spark",
            Self::CreateZonos => "create-zonos",
            Self::CreateKokoro => "create-kokoro",
            Self::CreateSesame => "create-sesame",
            Self::Transcribe => "transcribe",
        }
    }

    /// 多说话人对话变体
    pub fn is_dialogue(&self) -> bool {
        matches!(self, Self::CreateSesame)
    }
}

impl std::fmt::Display for BackendVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
