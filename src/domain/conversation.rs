//! Conversation - 多说话人对话轮次
//!
//! 不可变的有序序列：insert / update_at / remove_at 均返回新序列，
//! 原序列保持不变，轮次顺序即渲染顺序

use serde::{Deserialize, Serialize};

use super::errors::ParamError;

/// 新增轮次的默认说话人
pub const DEFAULT_SPEAKER_ID: u8 = 4;
/// 新增轮次的默认最大音频长度
pub const DEFAULT_MAX_AUDIO_LEN: u32 = 3000;
/// 可选说话人 ID 上限（1..=5）
pub const MAX_SPEAKER_ID: u8 = 5;

/// 对话轮次
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub text: String,
    pub speaker_id: u8,
    pub max_audio_len: u32,
}

impl ConversationTurn {
    pub fn new(text: impl Into<String>, speaker_id: u8, max_audio_len: u32) -> Self {
        Self {
            text: text.into(),
            speaker_id,
            max_audio_len,
        }
    }

    /// 去除首尾空白后文本为空
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if !(1..=MAX_SPEAKER_ID).contains(&self.speaker_id) {
            return Err(ParamError::out_of_range("speaker_id", self.speaker_id, "1..=5"));
        }
        if self.max_audio_len == 0 {
            return Err(ParamError::out_of_range("max_audio_len", 0, "> 0"));
        }
        Ok(())
    }
}

impl Default for ConversationTurn {
    fn default() -> Self {
        Self::new("", DEFAULT_SPEAKER_ID, DEFAULT_MAX_AUDIO_LEN)
    }
}

/// 对话（有序轮次序列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// 在末尾追加
    pub fn push(&self, turn: ConversationTurn) -> Self {
        let mut turns = self.turns.clone();
        turns.push(turn);
        Self { turns }
    }

    /// 在 index 处插入（index == len 等价于追加）
    pub fn insert(&self, index: usize, turn: ConversationTurn) -> Result<Self, ParamError> {
        if index > self.turns.len() {
            return Err(ParamError::TurnIndex {
                index,
                len: self.turns.len(),
            });
        }
        let mut turns = self.turns.clone();
        turns.insert(index, turn);
        Ok(Self { turns })
    }

    /// 替换 index 处的轮次
    pub fn update_at(&self, index: usize, turn: ConversationTurn) -> Result<Self, ParamError> {
        if index >= self.turns.len() {
            return Err(ParamError::TurnIndex {
                index,
                len: self.turns.len(),
            });
        }
        let mut turns = self.turns.clone();
        turns[index] = turn;
        Ok(Self { turns })
    }

    /// 删除 index 处的轮次
    pub fn remove_at(&self, index: usize) -> Result<Self, ParamError> {
        if index >= self.turns.len() {
            return Err(ParamError::TurnIndex {
                index,
                len: self.turns.len(),
            });
        }
        let mut turns = self.turns.clone();
        turns.remove(index);
        Ok(Self { turns })
    }

    /// 过滤空文本后存活的轮次，保持原有相对顺序
    pub fn surviving(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter().filter(|t| !t.is_blank())
    }

    /// 至少有一个非空轮次
    pub fn has_content(&self) -> bool {
        self.surviving().next().is_some()
    }

    /// 只校验存活轮次；空轮次在构造请求前即被剔除
    pub fn validate(&self) -> Result<(), ParamError> {
        self.surviving().try_for_each(ConversationTurn::validate)
    }
}

impl Default for Conversation {
    /// 默认包含一个空轮次
    fn default() -> Self {
        Self::new(vec![ConversationTurn::default()])
    }
}
