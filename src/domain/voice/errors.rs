//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Voice not found: {0}")]
    NotFound(String),

    #[error("Voice registry is empty")]
    EmptyRegistry,

    #[error("Failed to read voice registry: {0}")]
    RegistryIo(String),

    #[error("Failed to parse voice registry: {0}")]
    RegistryFormat(String),
}
