//! Ogg/Opus 容器 (RFC 7845)

use ogg::writing::{PacketWriteEndInfo, PacketWriter};
use opus::{Application, Channels, Encoder};

use super::wav::to_i16;
use crate::application::ports::CodecError;

const VENDOR: &str = "vocalizer";
const SERIAL: u32 = 0;
const FRAME_MS: usize = 20;
/// 单个 Opus 包的最大字节数
const MAX_PACKET_LEN: usize = 4000;
/// granule position 固定以 48kHz 计
const GRANULE_RATE: u64 = 48000;

struct OpusPacket {
    data: Vec<u8>,
    granule: u64,
}

/// Opus 只接受 8/12/16/24/48 kHz，向上取最近的一档
pub(crate) fn compatible_sample_rate(sample_rate: u32) -> u32 {
    [8000, 12000, 16000, 24000]
        .into_iter()
        .find(|&rate| sample_rate <= rate)
        .unwrap_or(48000)
}

/// 把交错 f32 样本编码为 Ogg/Opus 文件
pub(crate) fn encode(
    samples: &[f32],
    sample_rate: u32,
    channel_count: u8,
    bitrate: u32,
) -> Result<Vec<u8>, CodecError> {
    let channels = match channel_count {
        1 => Channels::Mono,
        2 => Channels::Stereo,
        n => {
            return Err(CodecError::UnsupportedFormat(format!(
                "Opus output supports 1 or 2 channels, got {}",
                n
            )))
        }
    };
    let stride = channel_count as usize;

    let rate = compatible_sample_rate(sample_rate);
    let samples = if rate == sample_rate {
        samples.to_vec()
    } else {
        tracing::debug!(from = sample_rate, to = rate, "Resampling for Opus");
        resample_linear(samples, sample_rate, rate, stride)
    };

    let mut encoder = Encoder::new(rate, channels, Application::Voip).map_err(|e| {
        CodecError::EncodingError(format!("Failed to create Opus encoder: {}", e))
    })?;
    encoder
        .set_bitrate(opus::Bitrate::Bits(bitrate as i32))
        .map_err(|e| CodecError::EncodingError(format!("Failed to set bitrate: {}", e)))?;
    // 编码器延迟以编码采样率计
    let lookahead = encoder
        .get_lookahead()
        .map(|l| l.max(0) as u32)
        .unwrap_or(rate / 400 + rate / 250);

    let packets = encode_packets(&mut encoder, &samples, rate, stride, lookahead)?;
    mux(
        opus_head(channel_count, sample_rate, pre_skip(lookahead, rate)),
        opus_tags(),
        packets,
    )
}

fn encode_packets(
    encoder: &mut Encoder,
    samples: &[f32],
    rate: u32,
    stride: usize,
    lookahead: u32,
) -> Result<Vec<OpusPacket>, CodecError> {
    let frame_len = rate as usize * FRAME_MS / 1000;
    let samples_per_frame = frame_len * stride;
    let granule_step = to_granule(frame_len as u64, rate);

    // 末尾补零到整帧，再追加静音帧把编码器延迟内的样本推出来
    let flush_frames = (lookahead as usize).div_ceil(frame_len).max(1);
    let total_frames = samples.len().div_ceil(samples_per_frame) + flush_frames;
    let mut pcm: Vec<i16> = samples.iter().map(|&s| to_i16(s)).collect();
    pcm.resize(total_frames * samples_per_frame, 0);

    let mut granule = u64::from(pre_skip(lookahead, rate));
    let mut buf = vec![0u8; MAX_PACKET_LEN];
    let mut packets = Vec::with_capacity(total_frames);

    for frame in pcm.chunks_exact(samples_per_frame) {
        let len = encoder
            .encode(frame, &mut buf)
            .map_err(|e| CodecError::EncodingError(format!("Opus encode failed: {}", e)))?;
        granule += granule_step;
        packets.push(OpusPacket {
            data: buf[..len].to_vec(),
            granule,
        });
    }

    Ok(packets)
}

/// 编码采样率下的帧数换算为 48kHz 下的帧数
fn to_granule(frames: u64, rate: u32) -> u64 {
    frames * GRANULE_RATE / rate as u64
}

/// OpusHead 中的 pre-skip 固定以 48kHz 计
fn pre_skip(lookahead: u32, rate: u32) -> u16 {
    to_granule(lookahead as u64, rate).min(u16::MAX as u64) as u16
}

fn mux(head: Vec<u8>, tags: Vec<u8>, packets: Vec<OpusPacket>) -> Result<Vec<u8>, CodecError> {
    let write_err = |e: std::io::Error| CodecError::EncodingError(format!("Ogg write failed: {}", e));

    let mut out = Vec::new();
    {
        let mut writer = PacketWriter::new(&mut out);
        writer
            .write_packet(head, SERIAL, PacketWriteEndInfo::EndPage, 0)
            .map_err(write_err)?;
        writer
            .write_packet(tags, SERIAL, PacketWriteEndInfo::EndPage, 0)
            .map_err(write_err)?;

        let last = packets.len().saturating_sub(1);
        for (index, packet) in packets.into_iter().enumerate() {
            let end = if index == last {
                PacketWriteEndInfo::EndStream
            } else {
                PacketWriteEndInfo::NormalPacket
            };
            writer
                .write_packet(packet.data, SERIAL, end, packet.granule)
                .map_err(write_err)?;
        }
    }
    Ok(out)
}

fn opus_head(channels: u8, input_rate: u32, pre_skip: u16) -> Vec<u8> {
    let fields: [&[u8]; 6] = [
        b"OpusHead",
        &[1, channels],
        &pre_skip.to_le_bytes(),
        &input_rate.to_le_bytes(),
        &0i16.to_le_bytes(), // output gain
        &[0],                // mapping family
    ];
    fields.concat()
}

fn opus_tags() -> Vec<u8> {
    let fields: [&[u8]; 4] = [
        b"OpusTags",
        &(VENDOR.len() as u32).to_le_bytes(),
        VENDOR.as_bytes(),
        &0u32.to_le_bytes(),
    ];
    fields.concat()
}

/// 逐帧线性插值
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32, stride: usize) -> Vec<f32> {
    let frames = samples.len() / stride;
    if frames == 0 || from_rate == to_rate {
        return samples.to_vec();
    }

    let step = from_rate as f64 / to_rate as f64;
    let out_frames = (frames as u64 * to_rate as u64 / from_rate as u64) as usize;

    (0..out_frames)
        .flat_map(|i| {
            let pos = i as f64 * step;
            let left = (pos as usize).min(frames - 1);
            let right = (left + 1).min(frames - 1);
            let t = (pos - left as f64) as f32;
            (0..stride).map(move |ch| {
                let a = samples[left * stride + ch];
                let b = samples[right * stride + ch];
                a + (b - a) * t
            })
        })
        .collect()
}
