//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::ports::{AudioFormat, EncodeConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 音色配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 音频输出配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 播放配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 音色配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 音色注册表文件（JSON，音色名 → 目录）
    /// 文件缺失或无效时使用内置音色
    #[serde(default = "default_registry_path")]
    pub registry_path: PathBuf,

    /// 默认音色名，未设置时为注册表中的第一个
    #[serde(default)]
    pub default_voice: Option<String>,

    /// 片段文件扩展名（不含点）
    #[serde(default = "default_clip_extension")]
    pub clip_extension: String,
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("VOICE/voices.json")
}

fn default_clip_extension() -> String {
    "mp3".to_string()
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            registry_path: default_registry_path(),
            default_voice: None,
            clip_extension: default_clip_extension(),
        }
    }
}

/// 音频输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// 输出格式
    /// 可选: wav, opus
    #[serde(default)]
    pub output_format: AudioFormat,

    /// 目标比特率（bps），仅用于 Opus
    /// Opus 推荐: 16000-64000 用于语音
    #[serde(default = "default_bitrate")]
    pub bitrate: u32,
}

fn default_bitrate() -> u32 {
    32000 // 32kbps，语音足够
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            output_format: AudioFormat::Wav,
            bitrate: default_bitrate(),
        }
    }
}

impl AudioConfig {
    pub fn encode_config(&self) -> EncodeConfig {
        EncodeConfig {
            format: self.output_format,
            bitrate: Some(self.bitrate),
        }
    }
}

/// 播放配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybackConfig {
    /// 播放器程序（名称或路径），未设置时自动探测
    #[serde(default)]
    pub player: Option<String>,

    /// 临时音频文件目录，未设置时使用系统临时目录
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl PlaybackConfig {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// 导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// 导出文件目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
