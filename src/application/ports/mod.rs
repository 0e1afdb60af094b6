//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_storage;
mod audio_codec;
mod playback_engine;

pub use artifact_storage::{ArtifactStoragePort, StorageError, TransientArtifact};
pub use audio_codec::{AudioCodecPort, AudioFormat, CodecError, EncodeConfig, EncodedAudio};
pub use playback_engine::{PlaybackEnginePort, PlaybackError};
