//! Artifact Storage Port - 出站端口
//!
//! 两类产物：
//! - 临时产物：播放用，离开作用域即删除
//! - 永久产物：导出用，按输入文本命名，重复导出直接覆盖

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::AudioFormat;

/// 产物存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid artifact name: {0}")]
    InvalidName(String),
}

/// 临时音频产物
///
/// 作用域守卫：无论播放成功、失败还是中途返回，drop 时都会删除文件。
#[derive(Debug)]
pub struct TransientArtifact {
    path: PathBuf,
    released: bool,
}

impl TransientArtifact {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 立即删除文件，并返回删除结果
    pub fn release(mut self) -> Result<(), StorageError> {
        self.released = true;
        remove_if_exists(&self.path)
    }
}

impl Drop for TransientArtifact {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = remove_if_exists(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove transient artifact");
        }
    }
}

fn remove_if_exists(path: &Path) -> Result<(), StorageError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Transient artifact removed");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::IoError(e.to_string())),
    }
}

/// Artifact Storage Port - 出站端口
#[async_trait]
pub trait ArtifactStoragePort: Send + Sync {
    /// 写入一个唯一命名的临时产物
    ///
    /// 写入失败时不得留下任何文件。
    async fn write_transient(
        &self,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<TransientArtifact, StorageError>;

    /// 永久产物的目标路径（由名称确定性推导）
    fn permanent_path(&self, name: &str, format: AudioFormat) -> Result<PathBuf, StorageError>;

    /// 写入永久产物
    ///
    /// 要么完整文件存在，要么什么都不存在；同名产物直接覆盖。
    async fn write_permanent(
        &self,
        name: &str,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<PathBuf, StorageError>;
}
