//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 音色名称（下拉框中显示的名字）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("voice name cannot be empty");
        }
        if name.len() > 100 {
            return Err("voice name cannot exceed 100 bytes");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色目录 - 存放 `<字符>.<扩展名>` 片段文件的目录
///
/// 由调用方解析并持有，核心流程只读不写。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDirectory(PathBuf);

impl VoiceDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// 目录当前是否存在（仅用于诊断日志）
    pub fn exists(&self) -> bool {
        self.0.is_dir()
    }
}

impl std::fmt::Display for VoiceDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&Path> for VoiceDirectory {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}
