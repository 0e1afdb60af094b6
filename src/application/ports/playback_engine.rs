//! Playback Engine Port - 播放引擎抽象
//!
//! `play` 返回的 future 在播放自然结束时完成，调用方以此等待，不做忙轮询。

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No audio player available")]
    NoPlayer,

    #[error("Failed to start player {player}: {message}")]
    SpawnFailed { player: String, message: String },

    #[error("Player {player} exited with {status}: {stderr}")]
    PlayerFailed {
        player: String,
        status: String,
        stderr: String,
    },

    #[error("Audio file not found: {0}")]
    FileNotFound(String),
}

/// Playback Engine Port
///
/// 同一时刻只服务一次播放；调用方负责串行化。
#[async_trait]
pub trait PlaybackEnginePort: Send + Sync {
    /// 播放音频文件，直到播放结束
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;

    /// 引擎名称（用于日志）
    fn name(&self) -> &str;
}
