//! Audio Codec Port - 音频编解码抽象
//!
//! 解码：片段文件（mp3 / wav ...）→ PCM
//! 编码：拼接后的 PCM → 输出容器（WAV / Ogg Opus）

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PcmAudio;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// 音频输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// 16-bit PCM WAV
    #[default]
    Wav,
    /// Opus 格式 (OGG 容器)
    #[serde(alias = "ogg")]
    Opus,
}

impl AudioFormat {
    /// 输出文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Opus => "opus",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioFormat::Wav => write!(f, "wav"),
            AudioFormat::Opus => write!(f, "opus"),
        }
    }
}

impl std::str::FromStr for AudioFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wav" => Ok(AudioFormat::Wav),
            "opus" | "ogg" => Ok(AudioFormat::Opus),
            _ => Err(CodecError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// 编码配置
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    /// 输出格式
    pub format: AudioFormat,
    /// 目标比特率（bps），仅用于 Opus
    pub bitrate: Option<u32>,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            format: AudioFormat::Wav,
            bitrate: Some(32000), // 32kbps，语音足够
        }
    }
}

/// 编码结果
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    /// 编码后的文件内容
    pub data: Vec<u8>,
    /// 输出格式
    pub format: AudioFormat,
    /// 时长（毫秒）
    pub duration_ms: u64,
}

/// Audio Codec Port
#[async_trait]
pub trait AudioCodecPort: Send + Sync {
    /// 解码一个片段文件
    ///
    /// # Arguments
    /// * `data` - 文件内容
    /// * `extension_hint` - 文件扩展名，用于格式探测
    fn decode(&self, data: &[u8], extension_hint: &str) -> Result<PcmAudio, CodecError>;

    /// 把 PCM 编码为指定输出格式
    async fn encode(
        &self,
        audio: &PcmAudio,
        config: &EncodeConfig,
    ) -> Result<EncodedAudio, CodecError>;

    /// 检查是否支持指定输出格式
    fn supports_format(&self, format: AudioFormat) -> bool;
}
