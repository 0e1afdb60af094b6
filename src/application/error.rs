//! 应用层错误定义
//!
//! 只有整条流水线级别的失败才会出现在这里；
//! 单个字符的片段缺失或解码失败在组装阶段就地吸收。

use thiserror::Error;

use crate::application::ports::{CodecError, PlaybackError, StorageError};
use crate::domain::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 没有任何字符解析到可用片段
    #[error("No usable clips found for {characters} character(s) in {voice_dir}")]
    AssemblyEmpty { characters: usize, voice_dir: String },

    /// 音色未找到
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// 编码失败
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// 写入失败
    #[error("Write error: {0}")]
    WriteError(String),

    /// 播放失败
    #[error("Playback error: {0}")]
    PlaybackError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<CodecError> for ApplicationError {
    fn from(err: CodecError) -> Self {
        Self::EncodeError(err.to_string())
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        Self::WriteError(err.to_string())
    }
}

impl From<PlaybackError> for ApplicationError {
    fn from(err: PlaybackError) -> Self {
        Self::PlaybackError(err.to_string())
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::NotFound(name) => Self::VoiceNotFound(name),
            other => Self::InternalError(other.to_string()),
        }
    }
}
