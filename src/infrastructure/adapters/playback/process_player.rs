//! Process Player - 通过外部播放器进程播放音频
//!
//! 播放器进程退出即播放结束；`play` 直接 await 进程，
//! 不轮询任何 "busy" 状态。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::application::ports::{AudioFormat, PlaybackEnginePort, PlaybackError};

/// WAV 可用的播放器（按优先级）
const WAV_PLAYERS: &[&str] = &["aplay", "paplay", "afplay", "ffplay"];

/// Ogg Opus 可用的播放器
const OPUS_PLAYERS: &[&str] = &["ffplay"];

/// 外部进程播放器
#[derive(Debug, Clone)]
pub struct ProcessPlayer {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessPlayer {
    /// 使用指定的播放器程序
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let args = default_args(&program);
        Self { program, args }
    }

    /// 选择播放器：优先使用配置的偏好，否则在 PATH 中按格式查找
    pub fn detect(preference: Option<&str>, format: AudioFormat) -> Result<Self, PlaybackError> {
        if let Some(pref) = preference {
            if let Some(bin) = find_in_path(pref) {
                return Ok(Self::new(bin));
            }
            tracing::warn!(player = pref, "Preferred audio player not found, falling back");
        }

        let candidates = match format {
            AudioFormat::Wav => WAV_PLAYERS,
            AudioFormat::Opus => OPUS_PLAYERS,
        };

        candidates
            .iter()
            .find_map(|name| find_in_path(name))
            .map(Self::new)
            .ok_or(PlaybackError::NoPlayer)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl PlaybackEnginePort for ProcessPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        if !path.is_file() {
            return Err(PlaybackError::FileNotFound(path.display().to_string()));
        }

        let player = self.name().to_string();
        tracing::debug!(player = %player, path = %path.display(), "Starting playback");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| PlaybackError::SpawnFailed {
                player: player.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(PlaybackError::PlayerFailed {
                player,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("player")
    }
}

fn default_args(program: &Path) -> Vec<String> {
    let name = program.file_name().and_then(|s| s.to_str()).unwrap_or("");
    match name {
        "ffplay" => ["-autoexit", "-nodisp", "-loglevel", "error"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        "aplay" => vec!["-q".to_string()],
        _ => Vec::new(),
    }
}

fn find_in_path(bin: &str) -> Option<PathBuf> {
    // If a path-like string is provided, respect it directly
    if bin.contains(std::path::MAIN_SEPARATOR) || bin.contains('/') {
        let p = PathBuf::from(bin);
        return if p.is_file() { Some(p) } else { None };
    }

    let paths_os = std::env::var_os("PATH")?;
    std::env::split_paths(&paths_os)
        .map(|dir| dir.join(bin))
        .find(|candidate| candidate.is_file())
}
