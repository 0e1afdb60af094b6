//! Audio - PCM 缓冲与片段拼接

mod pcm;
mod sequence;

pub use pcm::PcmAudio;
pub use sequence::{AssembledAudio, AudioSequence, FormatMismatch};
