//! Storage Adapter - 文件系统产物存储

mod file_storage;

pub use file_storage::{artifact_file_stem, FileArtifactStorage};
