//! Symphonia Codec - 片段解码与输出编码
//!
//! - 解码：symphonia 可探测的任意容器（mp3、wav、flac、ogg ...）→ 交错 PCM f32
//! - 编码：PCM → 16-bit WAV 或 Ogg/Opus

use async_trait::async_trait;
use std::io::Cursor;
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::{ogg_opus, wav};
use crate::application::ports::{
    AudioCodecPort, AudioFormat, CodecError, EncodeConfig, EncodedAudio,
};
use crate::domain::PcmAudio;

/// Symphonia 编解码器
pub struct SymphoniaCodec {
    /// Opus 默认比特率（EncodeConfig 未指定时使用）
    default_bitrate: u32,
}

impl SymphoniaCodec {
    pub fn new(default_bitrate: u32) -> Self {
        Self { default_bitrate }
    }
}

impl Default for SymphoniaCodec {
    fn default() -> Self {
        Self::new(32000)
    }
}

/// 解码过程中累积的样本
///
/// mp3 等格式可能要到第一个包解码后才知道采样率 / 声道数。
struct DecodedSamples {
    samples: Vec<f32>,
    sample_rate: Option<u32>,
    channels: Option<u8>,
}

impl DecodedSamples {
    fn append(&mut self, decoded: AudioBufferRef<'_>) {
        let spec = *decoded.spec();
        self.sample_rate.get_or_insert(spec.rate);
        self.channels.get_or_insert(spec.channels.count() as u8);

        let mut buffer = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        self.samples.extend_from_slice(buffer.samples());
    }

    fn into_pcm(self) -> Result<PcmAudio, CodecError> {
        let sample_rate = self
            .sample_rate
            .ok_or_else(|| CodecError::DecodingError("Unknown sample rate".to_string()))?;
        let channels = self
            .channels
            .ok_or_else(|| CodecError::DecodingError("Unknown channel count".to_string()))?;
        Ok(PcmAudio::new(self.samples, sample_rate, channels))
    }
}

/// 读取下一个包；流结束时返回 None
fn next_packet(reader: &mut dyn FormatReader) -> Result<Option<Packet>, CodecError> {
    match reader.next_packet() {
        Ok(packet) => Ok(Some(packet)),
        Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Ok(None)
        }
        Err(SymphoniaError::ResetRequired) => Ok(None),
        Err(e) => Err(CodecError::DecodingError(format!(
            "Packet read error: {}",
            e
        ))),
    }
}

fn decode_clip(data: &[u8], extension_hint: &str) -> Result<PcmAudio, CodecError> {
    if data.is_empty() {
        return Err(CodecError::InvalidInput("empty clip file".to_string()));
    }

    let source = MediaSourceStream::new(Box::new(Cursor::new(data.to_vec())), Default::default());
    let mut hint = Hint::new();
    if !extension_hint.is_empty() {
        hint.with_extension(extension_hint);
    }

    let mut reader = symphonia::default::get_probe()
        .format(
            &hint,
            source,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CodecError::DecodingError(format!("Probe failed: {}", e)))?
        .format;

    let track = reader
        .default_track()
        .ok_or_else(|| CodecError::DecodingError("No audio track found".to_string()))?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| CodecError::DecodingError(format!("Decoder creation failed: {}", e)))?;

    let mut decoded = DecodedSamples {
        samples: Vec::new(),
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count() as u8),
    };

    while let Some(packet) = next_packet(reader.as_mut())? {
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(buffer) => decoded.append(buffer),
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::warn!(error = e, "Skipping undecodable packet");
            }
            Err(e) => {
                return Err(CodecError::DecodingError(format!("Decode failed: {}", e)));
            }
        }
    }

    decoded.into_pcm()
}

#[async_trait]
impl AudioCodecPort for SymphoniaCodec {
    fn decode(&self, data: &[u8], extension_hint: &str) -> Result<PcmAudio, CodecError> {
        decode_clip(data, extension_hint)
    }

    async fn encode(
        &self,
        audio: &PcmAudio,
        config: &EncodeConfig,
    ) -> Result<EncodedAudio, CodecError> {
        let data = match config.format {
            AudioFormat::Wav => wav::encode(
                audio.samples(),
                audio.sample_rate(),
                u16::from(audio.channels()),
            )?,
            AudioFormat::Opus => ogg_opus::encode(
                audio.samples(),
                audio.sample_rate(),
                audio.channels(),
                config.bitrate.unwrap_or(self.default_bitrate),
            )?,
        };

        tracing::debug!(
            format = %config.format,
            size = data.len(),
            duration_ms = audio.duration_ms(),
            "Encoded assembled audio"
        );

        Ok(EncodedAudio {
            data,
            format: config.format,
            duration_ms: audio.duration_ms(),
        })
    }

    fn supports_format(&self, format: AudioFormat) -> bool {
        matches!(format, AudioFormat::Wav | AudioFormat::Opus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{constant_wav, TEST_SAMPLE_RATE};

    #[test]
    fn test_decode_wav_clip() {
        let codec = SymphoniaCodec::default();
        let wav = constant_wav(0.5, TEST_SAMPLE_RATE as usize, TEST_SAMPLE_RATE, 1);

        let pcm = codec.decode(&wav, "wav").unwrap();
        assert_eq!(pcm.sample_rate(), TEST_SAMPLE_RATE);
        assert_eq!(pcm.channels(), 1);
        assert_eq!(pcm.frames(), TEST_SAMPLE_RATE as usize);
        assert!(pcm.duration_ms() >= 990 && pcm.duration_ms() <= 1010); // ~1000ms
        assert!((pcm.samples()[0] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_decode_stereo_clip() {
        let codec = SymphoniaCodec::default();
        let wav = constant_wav(0.25, 800, 8000, 2);

        let pcm = codec.decode(&wav, "wav").unwrap();
        assert_eq!(pcm.channels(), 2);
        assert_eq!(pcm.frames(), 800);
        assert_eq!(pcm.duration_ms(), 100);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let codec = SymphoniaCodec::default();
        assert!(codec.decode(b"definitely not audio", "mp3").is_err());
        assert!(matches!(
            codec.decode(&[], "wav"),
            Err(CodecError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_encode_wav_is_decodable() {
        let codec = SymphoniaCodec::default();
        let pcm = PcmAudio::new(vec![0.25; 1600], 16000, 1);

        let encoded = codec
            .encode(&pcm, &EncodeConfig::default())
            .await
            .unwrap();
        assert_eq!(encoded.format, AudioFormat::Wav);
        assert_eq!(&encoded.data[0..4], b"RIFF");
        assert_eq!(encoded.data.len(), wav::HEADER_LEN + 1600 * 2);
        assert_eq!(encoded.duration_ms, 100);

        let decoded = codec.decode(&encoded.data, "wav").unwrap();
        assert_eq!(decoded.frames(), 1600);
    }

    #[tokio::test]
    async fn test_encode_is_deterministic() {
        let codec = SymphoniaCodec::default();
        let pcm = PcmAudio::new((0..800).map(|i| (i as f32 / 800.0) - 0.5).collect(), 8000, 1);

        let a = codec.encode(&pcm, &EncodeConfig::default()).await.unwrap();
        let b = codec.encode(&pcm, &EncodeConfig::default()).await.unwrap();
        assert_eq!(a.data, b.data);
    }

    #[tokio::test]
    async fn test_encode_to_opus() {
        let codec = SymphoniaCodec::default();
        let pcm = PcmAudio::new(vec![0.0; TEST_SAMPLE_RATE as usize], TEST_SAMPLE_RATE, 1);

        let config = EncodeConfig {
            format: AudioFormat::Opus,
            bitrate: Some(32000),
        };

        let encoded = codec.encode(&pcm, &config).await.unwrap();
        assert_eq!(encoded.format, AudioFormat::Opus);
        assert!(encoded.data.len() < TEST_SAMPLE_RATE as usize * 2);
        assert_eq!(&encoded.data[0..4], b"OggS");
    }

    #[tokio::test]
    async fn test_opus_rejects_surround() {
        let codec = SymphoniaCodec::default();
        let pcm = PcmAudio::new(vec![0.0; 600], 48000, 6);
        let config = EncodeConfig {
            format: AudioFormat::Opus,
            bitrate: None,
        };

        assert!(matches!(
            codec.encode(&pcm, &config).await,
            Err(CodecError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_opus_from_uncommon_rate() {
        let codec = SymphoniaCodec::default();
        let pcm = PcmAudio::new(vec![0.1; 2 * 22050], 22050, 2);
        let config = EncodeConfig {
            format: AudioFormat::Opus,
            bitrate: None,
        };

        let encoded = codec.encode(&pcm, &config).await.unwrap();
        assert_eq!(&encoded.data[0..4], b"OggS");
        assert_eq!(encoded.duration_ms, 1000);
    }

    #[test]
    fn test_supports_format() {
        let codec = SymphoniaCodec::default();
        assert!(codec.supports_format(AudioFormat::Wav));
        assert!(codec.supports_format(AudioFormat::Opus));
    }
}
