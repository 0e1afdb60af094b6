//! 交付策略
//!
//! - 临时交付：编码 → 写入唯一命名的临时文件 → 播放至结束 → 删除临时文件
//! - 永久交付：编码 → 以输入文本命名写入输出目录（覆盖同名文件）
//!
//! 两种策略都按值接收 [`AssembledAudio`]，交付完成后缓冲随之释放。

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactStoragePort, AudioCodecPort, CodecError, EncodeConfig, EncodedAudio,
    PlaybackEnginePort,
};
use crate::domain::AssembledAudio;

/// 交付结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// 播放完成，临时文件已删除
    PlaybackCompleted { duration_ms: u64, clip_count: usize },
    /// 已导出到永久文件
    Exported {
        path: PathBuf,
        duration_ms: u64,
        clip_count: usize,
    },
}

async fn encode(
    codec: &dyn AudioCodecPort,
    audio: &AssembledAudio,
    config: &EncodeConfig,
) -> Result<EncodedAudio, ApplicationError> {
    if !codec.supports_format(config.format) {
        tracing::error!(format = %config.format, "Output format not supported by codec");
        return Err(CodecError::UnsupportedFormat(config.format.to_string()).into());
    }

    codec.encode(audio.pcm(), config).await.map_err(|e| {
        tracing::error!(format = %config.format, error = %e, "Failed to encode assembled audio");
        ApplicationError::from(e)
    })
}

// ============================================================================
// Ephemeral
// ============================================================================

/// 临时交付（播放）
pub struct EphemeralDelivery {
    codec: Arc<dyn AudioCodecPort>,
    storage: Arc<dyn ArtifactStoragePort>,
    player: Arc<dyn PlaybackEnginePort>,
    encode_config: EncodeConfig,
}

impl EphemeralDelivery {
    pub fn new(
        codec: Arc<dyn AudioCodecPort>,
        storage: Arc<dyn ArtifactStoragePort>,
        player: Arc<dyn PlaybackEnginePort>,
        encode_config: EncodeConfig,
    ) -> Self {
        Self {
            codec,
            storage,
            player,
            encode_config,
        }
    }

    /// 播放并等待结束；任何退出路径上临时文件都不会残留
    pub async fn deliver(&self, audio: AssembledAudio) -> Result<DeliveryResult, ApplicationError> {
        let encoded = encode(self.codec.as_ref(), &audio, &self.encode_config).await?;

        let artifact = self
            .storage
            .write_transient(&encoded.data, encoded.format)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to write transient audio file");
                ApplicationError::from(e)
            })?;

        tracing::info!(
            path = %artifact.path().display(),
            player = self.player.name(),
            duration_ms = encoded.duration_ms,
            "Playing audio"
        );

        let played = self.player.play(artifact.path()).await;

        let path = artifact.path().to_path_buf();
        if let Err(e) = artifact.release() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete transient audio file");
        }

        played.map_err(|e| {
            tracing::error!(player = self.player.name(), error = %e, "Playback failed");
            ApplicationError::from(e)
        })?;

        Ok(DeliveryResult::PlaybackCompleted {
            duration_ms: encoded.duration_ms,
            clip_count: audio.clip_count(),
        })
    }
}

// ============================================================================
// Permanent
// ============================================================================

/// 永久交付（导出）
pub struct PermanentDelivery {
    codec: Arc<dyn AudioCodecPort>,
    storage: Arc<dyn ArtifactStoragePort>,
    encode_config: EncodeConfig,
}

impl PermanentDelivery {
    pub fn new(
        codec: Arc<dyn AudioCodecPort>,
        storage: Arc<dyn ArtifactStoragePort>,
        encode_config: EncodeConfig,
    ) -> Self {
        Self {
            codec,
            storage,
            encode_config,
        }
    }

    /// 导出到 `<name>.<扩展名>`，同名文件直接覆盖
    pub async fn deliver(
        &self,
        audio: AssembledAudio,
        name: &str,
    ) -> Result<DeliveryResult, ApplicationError> {
        let encoded = encode(self.codec.as_ref(), &audio, &self.encode_config).await?;

        let path = self
            .storage
            .write_permanent(name, &encoded.data, encoded.format)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to export combined audio");
                ApplicationError::from(e)
            })?;

        tracing::info!(path = %path.display(), size = encoded.data.len(), "Combined audio exported");

        Ok(DeliveryResult::Exported {
            path,
            duration_ms: encoded.duration_ms,
            clip_count: audio.clip_count(),
        })
    }
}
