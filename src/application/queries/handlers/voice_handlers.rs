//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::queries::{GetVoice, ListVoices};
use crate::domain::{VoiceDirectory, VoiceName, VoiceRegistry};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色详情响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceResponse {
    pub name: String,
    pub directory: VoiceDirectory,
    /// 音色目录当前是否存在
    pub available: bool,
    pub is_default: bool,
}

impl VoiceResponse {
    fn new(registry: &VoiceRegistry, name: &VoiceName, directory: &VoiceDirectory) -> Self {
        Self {
            name: name.as_str().to_string(),
            directory: directory.clone(),
            available: directory.exists(),
            is_default: registry.is_default(name),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetVoice Handler
pub struct GetVoiceHandler {
    registry: Arc<VoiceRegistry>,
}

impl GetVoiceHandler {
    pub fn new(registry: Arc<VoiceRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetVoice) -> Result<VoiceResponse, ApplicationError> {
        let name = match query.name {
            Some(name) => name,
            None => self.registry.default_voice().as_str().to_string(),
        };

        let (voice, directory) = self
            .registry
            .iter()
            .find(|(voice, _)| voice.as_str() == name)
            .ok_or_else(|| {
                tracing::error!(voice = %name, "Unknown voice");
                ApplicationError::VoiceNotFound(name.clone())
            })?;

        let response = VoiceResponse::new(&self.registry, voice, directory);
        if !response.available {
            tracing::warn!(
                voice = %name,
                voice_dir = %response.directory,
                "Voice directory does not exist"
            );
        }
        Ok(response)
    }
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    registry: Arc<VoiceRegistry>,
}

impl ListVoicesHandler {
    pub fn new(registry: Arc<VoiceRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceResponse>, ApplicationError> {
        Ok(self
            .registry
            .iter()
            .map(|(name, dir)| VoiceResponse::new(&self.registry, name, dir))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry(existing: &std::path::Path) -> Arc<VoiceRegistry> {
        Arc::new(
            VoiceRegistry::new(vec![
                (VoiceName::new("Michael").unwrap(), VoiceDirectory::from(existing)),
                (
                    VoiceName::new("Ava").unwrap(),
                    VoiceDirectory::new(existing.join("missing")),
                ),
            ])
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_get_default_voice() {
        let dir = tempdir().unwrap();
        let handler = GetVoiceHandler::new(registry(dir.path()));

        let voice = handler.handle(GetVoice::default()).await.unwrap();
        assert_eq!(voice.name, "Michael");
        assert!(voice.available);
        assert!(voice.is_default);
    }

    #[tokio::test]
    async fn test_get_named_voice() {
        let dir = tempdir().unwrap();
        let handler = GetVoiceHandler::new(registry(dir.path()));

        let voice = handler
            .handle(GetVoice {
                name: Some("Ava".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(voice.directory.path(), dir.path().join("missing"));
        assert!(!voice.available);
        assert!(!voice.is_default);
    }

    #[tokio::test]
    async fn test_get_unknown_voice() {
        let dir = tempdir().unwrap();
        let handler = GetVoiceHandler::new(registry(dir.path()));

        let result = handler
            .handle(GetVoice {
                name: Some("michael".to_string()),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::VoiceNotFound(name)) if name == "michael"));
    }

    #[tokio::test]
    async fn test_list_voices_in_registry_order() {
        let dir = tempdir().unwrap();
        let handler = ListVoicesHandler::new(registry(dir.path()));

        let voices = handler.handle(ListVoices).await.unwrap();
        let names: Vec<_> = voices.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Michael", "Ava"]);
        assert_eq!(voices.iter().filter(|v| v.is_default).count(), 1);
    }
}
