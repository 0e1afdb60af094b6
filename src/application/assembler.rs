//! AudioAssembler - 逐字符解析片段并按输入顺序拼接
//!
//! 单个字符的问题（片段缺失、无法解码、格式不一致）只记录警告并跳过，
//! 只有整段文本没有任何可用片段时才返回错误。

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioCodecPort, CodecError};
use crate::domain::audio::FormatMismatch;
use crate::domain::{AssembledAudio, AudioSequence, ClipRequest, ClipResolver, PcmAudio, VoiceDirectory};

/// 单个片段加载失败（就地吸收，不向上传播）
#[derive(Debug, Error)]
enum ClipLoadError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] CodecError),

    #[error(transparent)]
    Format(#[from] FormatMismatch),
}

/// 音频组装器
pub struct AudioAssembler {
    resolver: ClipResolver,
    codec: Arc<dyn AudioCodecPort>,
}

impl AudioAssembler {
    pub fn new(resolver: ClipResolver, codec: Arc<dyn AudioCodecPort>) -> Self {
        Self { resolver, codec }
    }

    /// 组装音频
    ///
    /// 相同的文本、目录与片段文件总是得到相同的结果。
    pub async fn assemble(
        &self,
        request: &ClipRequest,
        voice_dir: &VoiceDirectory,
    ) -> Result<AssembledAudio, ApplicationError> {
        if !voice_dir.exists() {
            tracing::warn!(voice_dir = %voice_dir, "Voice directory does not exist");
        }

        let mut sequence = AudioSequence::new();
        let mut missing = 0usize;
        let mut failed = 0usize;

        for (index, character) in request.characters().enumerate() {
            let clip = self.resolver.resolve(character, voice_dir);

            let Some(path) = clip.present_path() else {
                tracing::warn!(
                    index,
                    character = ?character,
                    voice_dir = %voice_dir,
                    "Clip not found, skipping"
                );
                missing += 1;
                continue;
            };

            let loaded = match self.load_clip(path).await {
                Ok(pcm) => sequence.push(pcm).map_err(ClipLoadError::from),
                Err(e) => Err(e),
            };

            match loaded {
                Ok(()) => {
                    tracing::debug!(index, character = ?character, path = %path.display(), "Clip appended");
                }
                Err(e) => {
                    tracing::warn!(
                        index,
                        character = ?character,
                        path = %path.display(),
                        error = %e,
                        "Failed to load clip, skipping"
                    );
                    failed += 1;
                }
            }
        }

        let clip_count = sequence.clip_count();
        let Some(audio) = sequence.finish() else {
            tracing::error!(
                characters = request.len(),
                missing,
                failed,
                voice_dir = %voice_dir,
                "No valid audio clips were found to combine"
            );
            return Err(ApplicationError::AssemblyEmpty {
                characters: request.len(),
                voice_dir: voice_dir.to_string(),
            });
        };

        tracing::info!(
            characters = request.len(),
            clips = clip_count,
            missing,
            failed,
            duration_ms = audio.duration_ms(),
            "Audio assembled"
        );

        Ok(audio)
    }

    async fn load_clip(&self, path: &Path) -> Result<PcmAudio, ClipLoadError> {
        let data = tokio::fs::read(path).await?;
        let pcm = self
            .codec
            .decode(&data, self.resolver.extension().as_str())?;
        Ok(pcm)
    }
}
