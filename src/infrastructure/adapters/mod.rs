//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod codec;
pub mod playback;
pub mod storage;

pub use codec::*;
pub use playback::*;
pub use storage::*;
