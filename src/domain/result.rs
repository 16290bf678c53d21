//! Normalized Result - 统一结果模型

use serde::{Deserialize, Serialize};

use super::media::MediaSubtype;

/// 单词时间戳（秒）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// 单词时间序列
///
/// 不变量:
/// - 按 start 非递减排序
/// - 每项 start <= end
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WordTimings(Vec<WordTiming>);

impl WordTimings {
    /// 从后端给出的任意顺序构造
    ///
    /// 按 start 稳定排序；end 早于 start 的项将 end 拉齐到 start
    pub fn from_unordered(mut timings: Vec<WordTiming>) -> Self {
        for t in timings.iter_mut() {
            if t.end < t.start {
                tracing::warn!(
                    word = %t.word,
                    start = t.start,
                    end = t.end,
                    "Word timing ends before it starts, clamping end"
                );
                t.end = t.start;
            }
        }
        timings.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self(timings)
    }

    pub fn as_slice(&self) -> &[WordTiming] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 归一化结果
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult {
    /// 已解码、可直接播放的音频
    Audio {
        bytes: Vec<u8>,
        subtype: MediaSubtype,
    },
    /// 转写文本及可选单词时间戳
    Transcript {
        text: String,
        word_timings: Option<WordTimings>,
    },
}

impl NormalizedResult {
    pub fn kind(&self) -> &'static str {
        match self {
            NormalizedResult::Audio { .. } => "audio",
            NormalizedResult::Transcript { .. } => "transcript",
        }
    }
}
