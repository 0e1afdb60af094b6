//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（AudioCodec、ArtifactStorage、PlaybackEngine）
//! - assembler: 按字符顺序组装片段
//! - delivery: 临时交付（播放）与永久交付（导出）
//! - commands: 播放、导出命令及处理器
//! - queries: 音色查询及处理器
//! - error: 应用层错误定义

pub mod assembler;
pub mod commands;
pub mod delivery;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use assembler::AudioAssembler;

pub use commands::{
    handlers::{ExportTextHandler, PlayTextHandler},
    ExportText, PlayText,
};

pub use delivery::{DeliveryResult, EphemeralDelivery, PermanentDelivery};

pub use error::ApplicationError;

pub use ports::{
    // Artifact storage
    ArtifactStoragePort,
    StorageError,
    TransientArtifact,
    // Audio codec
    AudioCodecPort,
    AudioFormat,
    CodecError,
    EncodeConfig,
    EncodedAudio,
    // Playback engine
    PlaybackEnginePort,
    PlaybackError,
};

pub use queries::{
    handlers::{GetVoiceHandler, ListVoicesHandler, VoiceResponse},
    GetVoice, ListVoices,
};
