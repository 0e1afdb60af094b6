//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色名称与音色目录
//! - 音色注册表（名称 → 目录）

mod errors;
mod registry;
mod value_objects;

pub use errors::VoiceError;
pub use registry::VoiceRegistry;
pub use value_objects::{VoiceDirectory, VoiceName};
