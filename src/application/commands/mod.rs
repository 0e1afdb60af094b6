//! 应用层 - 命令
//!
//! 播放与导出两种交付请求

mod delivery_commands;

pub mod handlers;

pub use delivery_commands::*;
