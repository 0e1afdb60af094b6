//! Codec Adapter - symphonia 解码 + WAV / Opus 编码

mod ogg_opus;
mod symphonia_codec;
pub(crate) mod wav;

pub use symphonia_codec::SymphoniaCodec;
