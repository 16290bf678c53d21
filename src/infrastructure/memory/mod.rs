//! Memory Layer - In-Memory State Management
//!
//! 实现 AudioResourcePort，在进程内持有可播放音频

mod audio_store;

pub use audio_store::InMemoryAudioStore;
