//! Persistence - 音色注册表文件

mod json_voice_registry;

pub use json_voice_registry::{
    load_voice_registry, load_voice_registry_or_builtin, parse_voice_registry,
};
