//! Delivery Command Handlers

use std::sync::Arc;

use crate::application::assembler::AudioAssembler;
use crate::application::commands::{ExportText, PlayText};
use crate::application::delivery::{DeliveryResult, EphemeralDelivery, PermanentDelivery};
use crate::application::error::ApplicationError;
use crate::domain::ClipRequest;

// ============================================================================
// PlayText
// ============================================================================

/// PlayText Handler
pub struct PlayTextHandler {
    assembler: Arc<AudioAssembler>,
    delivery: EphemeralDelivery,
}

impl PlayTextHandler {
    pub fn new(assembler: Arc<AudioAssembler>, delivery: EphemeralDelivery) -> Self {
        Self {
            assembler,
            delivery,
        }
    }

    pub async fn handle(&self, command: PlayText) -> Result<DeliveryResult, ApplicationError> {
        tracing::info!(
            text_len = command.text.chars().count(),
            voice_dir = %command.voice_dir,
            "Play requested"
        );

        let request = ClipRequest::new(command.text);
        let audio = self.assembler.assemble(&request, &command.voice_dir).await?;
        let result = self.delivery.deliver(audio).await?;

        tracing::info!("Playback completed");
        Ok(result)
    }
}

// ============================================================================
// ExportText
// ============================================================================

/// ExportText Handler
pub struct ExportTextHandler {
    assembler: Arc<AudioAssembler>,
    delivery: PermanentDelivery,
}

impl ExportTextHandler {
    pub fn new(assembler: Arc<AudioAssembler>, delivery: PermanentDelivery) -> Self {
        Self {
            assembler,
            delivery,
        }
    }

    pub async fn handle(&self, command: ExportText) -> Result<DeliveryResult, ApplicationError> {
        tracing::info!(
            text_len = command.text.chars().count(),
            voice_dir = %command.voice_dir,
            "Export requested"
        );

        let request = ClipRequest::new(command.text.as_str());
        let audio = self.assembler.assemble(&request, &command.voice_dir).await?;
        self.delivery.deliver(audio, &command.text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::EncodeConfig;
    use crate::domain::{ClipExtension, ClipResolver, VoiceDirectory};
    use crate::infrastructure::adapters::{FileArtifactStorage, SymphoniaCodec};
    use crate::test_support::{dir_entries, write_clip, FakePlayer};
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        voice: TempDir,
        temp: TempDir,
        out: TempDir,
        player: Arc<FakePlayer>,
        play: PlayTextHandler,
        export: ExportTextHandler,
    }

    async fn fixture(player: FakePlayer) -> Fixture {
        let (voice, temp, out) = (tempdir().unwrap(), tempdir().unwrap(), tempdir().unwrap());
        write_clip(voice.path(), 'A', 0.25, 1.0);
        write_clip(voice.path(), 'C', -0.5, 1.0);

        let codec = Arc::new(SymphoniaCodec::default());
        let storage = Arc::new(
            FileArtifactStorage::new(temp.path(), out.path()),
        );
        let player = Arc::new(player);
        let assembler = Arc::new(AudioAssembler::new(
            ClipResolver::new(ClipExtension::new("wav").unwrap()),
            codec.clone(),
        ));

        let play = PlayTextHandler::new(
            assembler.clone(),
            EphemeralDelivery::new(
                codec.clone(),
                storage.clone(),
                player.clone(),
                EncodeConfig::default(),
            ),
        );
        let export = ExportTextHandler::new(
            assembler,
            PermanentDelivery::new(codec, storage, EncodeConfig::default()),
        );

        Fixture {
            voice,
            temp,
            out,
            player,
            play,
            export,
        }
    }

    fn voice_dir(fx: &Fixture) -> VoiceDirectory {
        VoiceDirectory::from(fx.voice.path())
    }

    #[tokio::test]
    async fn test_play_text() {
        let fx = fixture(FakePlayer::default()).await;

        let result = fx
            .play
            .handle(PlayText {
                text: "ABC".to_string(),
                voice_dir: voice_dir(&fx),
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            DeliveryResult::PlaybackCompleted {
                duration_ms: 2000,
                clip_count: 2
            }
        );
        assert_eq!(fx.player.calls().len(), 1);
        assert!(dir_entries(fx.temp.path()).is_empty());
        assert!(dir_entries(fx.out.path()).is_empty());
    }

    #[tokio::test]
    async fn test_play_failure_leaves_no_artifact() {
        let fx = fixture(FakePlayer::failing()).await;

        let result = fx
            .play
            .handle(PlayText {
                text: "AC".to_string(),
                voice_dir: voice_dir(&fx),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::PlaybackError(_))));
        assert!(dir_entries(fx.temp.path()).is_empty());
    }

    #[tokio::test]
    async fn test_empty_assembly_skips_delivery() {
        let fx = fixture(FakePlayer::default()).await;

        let play = fx
            .play
            .handle(PlayText {
                text: "xyz".to_string(),
                voice_dir: voice_dir(&fx),
            })
            .await;
        let export = fx
            .export
            .handle(ExportText {
                text: "xyz".to_string(),
                voice_dir: voice_dir(&fx),
            })
            .await;

        assert!(matches!(play, Err(ApplicationError::AssemblyEmpty { .. })));
        assert!(matches!(export, Err(ApplicationError::AssemblyEmpty { .. })));
        assert!(fx.player.calls().is_empty());
        assert!(dir_entries(fx.temp.path()).is_empty());
        assert!(dir_entries(fx.out.path()).is_empty());
    }

    #[tokio::test]
    async fn test_export_named_after_text() {
        let fx = fixture(FakePlayer::default()).await;
        let command = ExportText {
            text: "CAB".to_string(),
            voice_dir: voice_dir(&fx),
        };

        let first = fx.export.handle(command.clone()).await.unwrap();
        let first_bytes = std::fs::read(fx.out.path().join("CAB.wav")).unwrap();
        let second = fx.export.handle(command).await.unwrap();
        let second_bytes = std::fs::read(fx.out.path().join("CAB.wav")).unwrap();

        assert_eq!(
            first,
            DeliveryResult::Exported {
                path: fx.out.path().join("CAB.wav"),
                duration_ms: 2000,
                clip_count: 2
            }
        );
        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
        assert_eq!(dir_entries(fx.out.path()).len(), 1);
        assert!(fx.player.calls().is_empty());
    }
}
