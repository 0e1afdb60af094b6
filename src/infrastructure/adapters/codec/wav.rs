//! 16-bit PCM WAV 容器

use crate::application::ports::CodecError;

pub(crate) const HEADER_LEN: usize = 44;

const BYTES_PER_SAMPLE: u16 = 2;

/// RIFF/WAVE 头，`data_len` 为 data 块字节数
pub(crate) fn header(sample_rate: u32, channels: u16, data_len: u32) -> [u8; HEADER_LEN] {
    let block_align = channels * BYTES_PER_SAMPLE;
    let byte_rate = sample_rate * u32::from(block_align);

    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&(data_len + 36).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&(BYTES_PER_SAMPLE * 8).to_le_bytes());
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());
    header
}

/// f32 → i16，超出 [-1, 1] 的样本被截断
pub(crate) fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// 把交错 f32 样本写成完整的 WAV 文件
pub(crate) fn encode(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>, CodecError> {
    if channels == 0 || sample_rate == 0 {
        return Err(CodecError::InvalidInput(format!(
            "invalid PCM format: {}Hz/{}ch",
            sample_rate, channels
        )));
    }

    let data_len = u32::try_from(samples.len() * BYTES_PER_SAMPLE as usize)
        .ok()
        .filter(|len| *len <= u32::MAX - 36)
        .ok_or_else(|| CodecError::EncodingError("audio too long for a WAV container".to_string()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + data_len as usize);
    out.extend_from_slice(&header(sample_rate, channels, data_len));
    out.extend(samples.iter().flat_map(|&s| to_i16(s).to_le_bytes()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = header(16000, 2, 400);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes(header[4..8].try_into().unwrap()), 436);
        assert_eq!(u32::from_le_bytes(header[28..32].try_into().unwrap()), 64000);
        assert_eq!(u16::from_le_bytes(header[32..34].try_into().unwrap()), 4);
        assert_eq!(&header[36..40], b"data");
    }

    #[test]
    fn test_to_i16_clamps() {
        assert_eq!(to_i16(2.0), i16::MAX);
        assert_eq!(to_i16(-2.0), -i16::MAX);
        assert_eq!(to_i16(0.0), 0);
    }

    #[test]
    fn test_encode_rejects_zero_channels() {
        assert!(matches!(
            encode(&[0.0; 4], 16000, 0),
            Err(CodecError::InvalidInput(_))
        ));
    }
}
