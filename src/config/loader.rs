//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（vocalizer.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::application::ports::AudioFormat;
use crate::domain::ClipExtension;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["vocalizer", "vocalizer.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "VOCALIZER";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOCALIZER_`，层级分隔符 `__`）
/// 2. 配置文件：`config_path` 指定的文件（必须存在），
///    否则搜索 vocalizer.toml / vocalizer.local.toml（可选）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOCALIZER_VOICES__DEFAULT_VOICE=Ava`
/// - `VOCALIZER_AUDIO__OUTPUT_FORMAT=opus`
/// - `VOCALIZER_PLAYBACK__PLAYER=paplay`
/// - `VOCALIZER_EXPORT__OUTPUT_DIR=/data/exports`
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("voices.registry_path", "VOICE/voices.json")?
        .set_default("voices.clip_extension", "mp3")?
        .set_default("audio.output_format", "wav")?
        .set_default("audio.bitrate", 32000)?
        .set_default("export.output_dir", ".")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: VOCALIZER_AUDIO__BITRATE=24000
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    ClipExtension::new(config.voices.clip_extension.as_str()).map_err(|e| {
        ConfigError::ValidationError(format!(
            "Invalid clip extension '{}': {}",
            config.voices.clip_extension, e
        ))
    })?;

    if matches!(&config.voices.default_voice, Some(name) if name.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "Default voice cannot be blank".to_string(),
        ));
    }

    if config.audio.output_format == AudioFormat::Opus && config.audio.bitrate == 0 {
        return Err(ConfigError::ValidationError(
            "Bitrate cannot be 0 when output format is opus".to_string(),
        ));
    }

    if matches!(&config.playback.player, Some(player) if player.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "Player cannot be blank".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Application Configuration ===");
    tracing::debug!("Voice Registry: {:?}", config.voices.registry_path);
    tracing::debug!(
        "Default Voice: {}",
        config.voices.default_voice.as_deref().unwrap_or("<first registered>")
    );
    tracing::debug!("Clip Extension: {}", config.voices.clip_extension);
    tracing::debug!("Output Format: {}", config.audio.output_format);
    if config.audio.output_format == AudioFormat::Opus {
        tracing::debug!("Bitrate: {}bps", config.audio.bitrate);
    }
    tracing::debug!(
        "Player: {}",
        config.playback.player.as_deref().unwrap_or("<auto>")
    );
    tracing::debug!("Temp Directory: {:?}", config.playback.temp_dir());
    tracing::debug!("Export Directory: {:?}", config.export.output_dir);
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("=================================");
}
