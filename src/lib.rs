//! Vocalizer - 按字符拼接语音片段的朗读工具
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色注册表
//! - Clip Context: 字符 → 片段文件解析
//! - Audio: PCM 缓冲与顺序拼接
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AudioCodec, ArtifactStorage, PlaybackEngine）
//! - Assembler / Delivery: 组装与交付（播放、导出）
//! - Commands / Queries: 命令与查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Symphonia 编解码、文件产物存储、外部播放器进程
//! - Persistence: JSON 音色注册表

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use config::{load_config_from_path, AppConfig};
