//! Domain Layer - 领域层
//!
//! 包含:
//! - Voice Context: 音色与注册表
//! - Clip Context: 字符片段解析
//! - Audio: PCM 缓冲与按序拼接

pub mod audio;
pub mod clip;
pub mod voice;

pub use audio::{AssembledAudio, AudioSequence, PcmAudio};
pub use clip::{ClipExtension, ClipRequest, ClipResolver, ResolvedClip};
pub use voice::{VoiceDirectory, VoiceError, VoiceName, VoiceRegistry};
