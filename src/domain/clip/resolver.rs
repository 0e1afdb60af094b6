//! ClipResolver - 字符 → 片段文件

use crate::domain::voice::VoiceDirectory;

use super::{ClipExtension, ResolvedClip};

/// 片段解析器
///
/// 期望路径为 `<音色目录>/<字符>.<扩展名>`，只检查该路径本身，
/// 不查询任何后备目录。缺失是正常结果，不是错误。
#[derive(Debug, Clone, Default)]
pub struct ClipResolver {
    extension: ClipExtension,
}

impl ClipResolver {
    pub fn new(extension: ClipExtension) -> Self {
        Self { extension }
    }

    pub fn extension(&self) -> &ClipExtension {
        &self.extension
    }

    /// 字符对应的片段文件名
    pub fn file_name(&self, character: char) -> Option<String> {
        if std::path::is_separator(character) || character == '\0' {
            return None;
        }
        Some(format!("{}.{}", character, self.extension))
    }

    pub fn resolve(&self, character: char, voice_dir: &VoiceDirectory) -> ResolvedClip {
        let Some(file_name) = self.file_name(character) else {
            return ResolvedClip {
                character,
                path: None,
                present: false,
            };
        };

        let path = voice_dir.path().join(file_name);
        let present = path.is_file();

        ResolvedClip {
            character,
            path: Some(path),
            present,
        }
    }
}
