//! PCM 音频缓冲

use std::time::Duration;

/// 解码后的 PCM 音频（交错 f32 样本）
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u8,
}

impl PcmAudio {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u8) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// 帧数（每帧包含 channels 个样本）
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.frames() as u64 * 1000) / self.sample_rate as u64
    }

    /// 采样率与声道数是否一致（只有一致时才能直接拼接）
    pub fn same_format(&self, other: &PcmAudio) -> bool {
        self.sample_rate == other.sample_rate && self.channels == other.channels
    }

    pub(crate) fn extend_from(&mut self, other: &PcmAudio) {
        self.samples.extend_from_slice(&other.samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_stereo() {
        let pcm = PcmAudio::new(vec![0.0; 2 * 8000], 16000, 2);
        assert_eq!(pcm.frames(), 8000);
        assert_eq!(pcm.duration_ms(), 500);
        assert_eq!(pcm.duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_zero_rate_is_zero_duration() {
        let pcm = PcmAudio::new(vec![0.0; 10], 0, 1);
        assert_eq!(pcm.duration(), Duration::ZERO);
        assert_eq!(pcm.duration_ms(), 0);
    }
}
