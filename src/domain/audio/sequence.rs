//! 片段序列 - 按输入顺序拼接 PCM 片段

use std::time::Duration;
use thiserror::Error;

use super::PcmAudio;

/// 片段格式与序列中已有片段不一致
#[derive(Debug, Error)]
#[error(
    "clip format {actual_rate}Hz/{actual_channels}ch does not match sequence format {expected_rate}Hz/{expected_channels}ch"
)]
pub struct FormatMismatch {
    pub expected_rate: u32,
    pub expected_channels: u8,
    pub actual_rate: u32,
    pub actual_channels: u8,
}

/// 拼接中的片段序列
///
/// 第一个非空片段决定整条序列的采样率与声道数；
/// 之后的片段只做样本顺序追加，不做重采样或混音。
/// 空片段计入片段数，但不参与格式判定。
#[derive(Debug, Default)]
pub struct AudioSequence {
    buffer: Option<PcmAudio>,
    clip_count: usize,
}

impl AudioSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个片段
    pub fn push(&mut self, clip: PcmAudio) -> Result<(), FormatMismatch> {
        if clip.is_empty() {
            self.clip_count += 1;
            return Ok(());
        }

        match self.buffer.as_mut() {
            None => self.buffer = Some(clip),
            Some(buffer) => {
                if !buffer.same_format(&clip) {
                    return Err(FormatMismatch {
                        expected_rate: buffer.sample_rate(),
                        expected_channels: buffer.channels(),
                        actual_rate: clip.sample_rate(),
                        actual_channels: clip.channels(),
                    });
                }
                buffer.extend_from(&clip);
            }
        }
        self.clip_count += 1;
        Ok(())
    }

    pub fn clip_count(&self) -> usize {
        self.clip_count
    }

    /// 结束拼接；没有任何样本时返回 None，绝不产出空缓冲
    pub fn finish(self) -> Option<AssembledAudio> {
        let pcm = self.buffer?;
        if pcm.is_empty() {
            return None;
        }
        Some(AssembledAudio {
            pcm,
            clip_count: self.clip_count,
        })
    }
}

/// 拼接完成的音频
///
/// 只能通过 [`AudioSequence::finish`] 得到，因此必然非空。
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledAudio {
    pcm: PcmAudio,
    clip_count: usize,
}

impl AssembledAudio {
    pub fn pcm(&self) -> &PcmAudio {
        &self.pcm
    }

    pub fn clip_count(&self) -> usize {
        self.clip_count
    }

    pub fn duration(&self) -> Duration {
        self.pcm.duration()
    }

    pub fn duration_ms(&self) -> u64 {
        self.pcm.duration_ms()
    }
}
