//! Vocalizer - 按字符拼接语音片段的朗读工具
//!
//! - play: 组装后通过外部播放器播放，临时文件在播放结束后删除
//! - export: 组装后以输入文本命名导出到输出目录
//! - voices: 列出已注册的音色

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use vocalizer::application::{
    AudioAssembler, DeliveryResult, EphemeralDelivery, ExportText, ExportTextHandler, GetVoice,
    GetVoiceHandler, ListVoices, ListVoicesHandler, PermanentDelivery, PlayText, PlayTextHandler,
};
use vocalizer::application::ports::AudioFormat;
use vocalizer::config::{load_config_from_path, print_config, AppConfig, LogConfig};
use vocalizer::domain::{ClipExtension, ClipResolver, VoiceRegistry};
use vocalizer::infrastructure::adapters::{FileArtifactStorage, ProcessPlayer, SymphoniaCodec};
use vocalizer::infrastructure::persistence::load_voice_registry_or_builtin;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "vocalizer")]
#[command(about = "Speak text by concatenating per-character voice clips", long_about = None)]
struct Cli {
    /// Configuration file (defaults to vocalizer.toml / vocalizer.local.toml).
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,
    /// Output format override (wav or opus).
    #[arg(long, global = true)]
    format: Option<AudioFormat>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Assemble the text and play it once.
    Play {
        /// Text to speak.
        text: String,
        /// Registered voice name (defaults to the configured default voice).
        #[arg(long)]
        voice: Option<String>,
    },
    /// Assemble the text and save it as `<text>.<format>` in the output directory.
    Export {
        /// Text to speak.
        text: String,
        /// Registered voice name (defaults to the configured default voice).
        #[arg(long)]
        voice: Option<String>,
    },
    /// List registered voices.
    Voices,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let mut config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    if let Some(format) = cli.format {
        config.audio.output_format = format;
    }

    init_tracing(&config.log);
    print_config(&config);

    let registry = Arc::new(load_registry(&config).await);

    match cli.command {
        Commands::Voices => list_voices(registry).await,
        Commands::Play { text, voice } => play(&config, registry, text, voice).await,
        Commands::Export { text, voice } => export(&config, registry, text, voice).await,
    }
}

/// 初始化日志
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("warn,vocalizer={}", log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 加载音色注册表并应用配置的默认音色
async fn load_registry(config: &AppConfig) -> VoiceRegistry {
    let registry = load_voice_registry_or_builtin(&config.voices.registry_path).await;

    match &config.voices.default_voice {
        Some(name) => match registry.clone().with_default(name) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::warn!(
                    voice = %name,
                    fallback = %registry.default_voice(),
                    error = %e,
                    "Configured default voice is not registered"
                );
                registry
            }
        },
        None => registry,
    }
}

fn build_assembler(config: &AppConfig, codec: Arc<SymphoniaCodec>) -> anyhow::Result<AudioAssembler> {
    let extension = ClipExtension::new(config.voices.clip_extension.as_str())
        .map_err(|e| anyhow::anyhow!("Invalid clip extension: {}", e))?;
    Ok(AudioAssembler::new(ClipResolver::new(extension), codec))
}

async fn list_voices(registry: Arc<VoiceRegistry>) -> anyhow::Result<()> {
    let voices = ListVoicesHandler::new(registry).handle(ListVoices).await?;

    for voice in voices {
        let marker = if voice.is_default { "*" } else { " " };
        let status = if voice.available { "" } else { "  (missing)" };
        println!("{} {:<24} {}{}", marker, voice.name, voice.directory, status);
    }

    Ok(())
}

async fn play(
    config: &AppConfig,
    registry: Arc<VoiceRegistry>,
    text: String,
    voice: Option<String>,
) -> anyhow::Result<()> {
    let voice = GetVoiceHandler::new(registry)
        .handle(GetVoice { name: voice })
        .await?;

    let encode_config = config.audio.encode_config();
    let player = ProcessPlayer::detect(config.playback.player.as_deref(), encode_config.format)
        .context("Failed to select audio player")?;
    tracing::info!(player = %player.program().display(), "Audio player selected");

    let codec = Arc::new(SymphoniaCodec::new(config.audio.bitrate));
    let storage = Arc::new(
        FileArtifactStorage::new(config.playback.temp_dir(), &config.export.output_dir),
    );
    let assembler = Arc::new(build_assembler(config, codec.clone())?);

    let handler = PlayTextHandler::new(
        assembler,
        EphemeralDelivery::new(codec, storage, Arc::new(player), encode_config),
    );

    let command = PlayText {
        text,
        voice_dir: voice.directory,
    };

    // 中断时丢弃播放任务：播放器进程被终止，临时文件随之删除
    tokio::select! {
        result = handler.handle(command) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received interrupt, playback stopped");
        }
    }

    Ok(())
}

async fn export(
    config: &AppConfig,
    registry: Arc<VoiceRegistry>,
    text: String,
    voice: Option<String>,
) -> anyhow::Result<()> {
    let voice = GetVoiceHandler::new(registry)
        .handle(GetVoice { name: voice })
        .await?;

    let codec = Arc::new(SymphoniaCodec::new(config.audio.bitrate));
    let storage = Arc::new(
        FileArtifactStorage::new(config.playback.temp_dir(), &config.export.output_dir),
    );
    let assembler = Arc::new(build_assembler(config, codec.clone())?);

    let handler = ExportTextHandler::new(
        assembler,
        PermanentDelivery::new(codec, storage, config.audio.encode_config()),
    );

    let result = handler
        .handle(ExportText {
            text,
            voice_dir: voice.directory,
        })
        .await?;

    if let DeliveryResult::Exported { path, .. } = result {
        println!("{}", path.display());
    }

    Ok(())
}
