//! File Storage - 文件系统产物存储实现
//!
//! 实现 ArtifactStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{
    ArtifactStoragePort, AudioFormat, StorageError, TransientArtifact,
};

/// 临时文件名前缀
const TRANSIENT_PREFIX: &str = "vocalizer-";

/// 文件系统产物存储
pub struct FileArtifactStorage {
    /// 临时产物目录
    transient_dir: PathBuf,
    /// 永久产物目录
    output_dir: PathBuf,
}

impl FileArtifactStorage {
    /// 创建新的文件存储
    ///
    /// 只记录路径；目录在对应的写入操作中按需创建。
    pub fn new(transient_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            transient_dir: transient_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

async fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| StorageError::IoError(format!("{}: {}", dir.display(), e)))
}

/// 由输入文本推导文件名主干
///
/// 保持文本原样，只把不能出现在文件名中的字符替换为 `_`。
pub fn artifact_file_stem(name: &str) -> Result<String, StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidName("name cannot be empty".to_string()));
    }

    Ok(name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect())
}

#[async_trait]
impl ArtifactStoragePort for FileArtifactStorage {
    async fn write_transient(
        &self,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<TransientArtifact, StorageError> {
        ensure_dir(&self.transient_dir).await?;

        let suffix = format!(".{}", format.extension());
        let temp_path = tempfile::Builder::new()
            .prefix(TRANSIENT_PREFIX)
            .suffix(&suffix)
            .tempfile_in(&self.transient_dir)
            .map_err(|e| StorageError::IoError(e.to_string()))?
            .into_temp_path();

        // 写入失败时 temp_path 在此处 drop，文件随之删除
        fs::write(&temp_path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        let path = temp_path
            .keep()
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            size = data.len(),
            "Saved transient artifact"
        );

        Ok(TransientArtifact::new(path))
    }

    fn permanent_path(&self, name: &str, format: AudioFormat) -> Result<PathBuf, StorageError> {
        let stem = artifact_file_stem(name)?;
        Ok(self
            .output_dir
            .join(format!("{}.{}", stem, format.extension())))
    }

    async fn write_permanent(
        &self,
        name: &str,
        data: &[u8],
        format: AudioFormat,
    ) -> Result<PathBuf, StorageError> {
        let target = self.permanent_path(name, format)?;
        ensure_dir(&self.output_dir).await?;

        // 先写同目录下的临时文件，再原子重命名到目标路径
        let temp_path = tempfile::Builder::new()
            .prefix(".vocalizer-export-")
            .tempfile_in(&self.output_dir)
            .map_err(|e| StorageError::IoError(e.to_string()))?
            .into_temp_path();

        fs::write(&temp_path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        temp_path
            .persist(&target)
            .map_err(|e| StorageError::IoError(format!("{}: {}", target.display(), e.error)))?;

        tracing::debug!(
            path = %target.display(),
            size = data.len(),
            "Saved permanent artifact"
        );

        Ok(target)
    }
}
