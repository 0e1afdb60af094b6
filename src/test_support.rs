//! 测试辅助：生成 WAV 片段

use std::path::{Path, PathBuf};

use crate::infrastructure::adapters::codec::wav;

pub const TEST_SAMPLE_RATE: u32 = 16000;

/// 生成一段恒定幅值的 16-bit PCM WAV
pub fn constant_wav(value: f32, frames: usize, sample_rate: u32, channels: u16) -> Vec<u8> {
    let num_samples = frames * channels as usize;
    let sample = wav::to_i16(value).to_le_bytes();

    let mut out = wav::header(sample_rate, channels, (num_samples * 2) as u32).to_vec();
    for _ in 0..num_samples {
        out.extend_from_slice(&sample);
    }
    out
}

/// 在音色目录中写入 `<character>.wav`，时长 `secs` 秒、单声道
pub fn write_clip(dir: &Path, character: char, value: f32, secs: f32) -> PathBuf {
    let frames = (TEST_SAMPLE_RATE as f32 * secs) as usize;
    let path = dir.join(format!("{}.wav", character));
    std::fs::write(&path, constant_wav(value, frames, TEST_SAMPLE_RATE, 1)).unwrap();
    path
}

/// 记录调用的播放引擎，可配置为失败
#[derive(Default)]
pub struct FakePlayer {
    pub fail: bool,
    /// (播放路径, 播放时文件是否存在)
    pub played: std::sync::Mutex<Vec<(PathBuf, bool)>>,
}

impl FakePlayer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, bool)> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl crate::application::ports::PlaybackEnginePort for FakePlayer {
    async fn play(&self, path: &Path) -> Result<(), crate::application::ports::PlaybackError> {
        self.played
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.is_file()));
        if self.fail {
            return Err(crate::application::ports::PlaybackError::PlayerFailed {
                player: "fake".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "device busy".to_string(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// 列出目录中的全部条目
pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}
