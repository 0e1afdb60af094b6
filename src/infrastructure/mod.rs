//! Infrastructure Layer - 基础设施层
//!
//! - adapters: 编解码、产物存储、播放器
//! - persistence: 音色注册表文件

pub mod adapters;
pub mod persistence;
