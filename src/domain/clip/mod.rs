//! Clip Context - 片段限界上下文
//!
//! 职责:
//! - 字符到片段文件的映射规则
//! - 片段请求与查找结果

mod resolver;
mod value_objects;

pub use resolver::ClipResolver;
pub use value_objects::{ClipExtension, ClipRequest, ResolvedClip};
