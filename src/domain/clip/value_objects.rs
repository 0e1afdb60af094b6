//! Clip Context - Value Objects

use std::path::{Path, PathBuf};

/// 片段文件扩展名（不含点），例如 `mp3`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipExtension(String);

impl ClipExtension {
    pub fn new(ext: impl Into<String>) -> Result<Self, &'static str> {
        let ext = ext.into();
        if ext.is_empty() {
            return Err("clip extension cannot be empty");
        }
        if ext.contains(['.', '/', '\\', '\0']) {
            return Err("clip extension must be a bare extension such as \"mp3\"");
        }
        Ok(Self(ext))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClipExtension {
    fn default() -> Self {
        Self("mp3".to_string())
    }
}

impl std::fmt::Display for ClipExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一次调用的片段请求：输入文本的全部字符，按原顺序
///
/// 不去重、不归一化，空白和重复字符各自产生一次查找。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRequest {
    text: String,
}

impl ClipRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        self.text.chars()
    }

    /// 字符数（即查找次数）
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// 单个字符的查找结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClip {
    pub character: char,
    /// 期望的片段路径；字符无法构成文件名（路径分隔符、NUL）时为 None
    pub path: Option<PathBuf>,
    pub present: bool,
}

impl ResolvedClip {
    /// 存在时返回片段路径
    pub fn present_path(&self) -> Option<&Path> {
        if self.present {
            self.path.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_extension_validation() {
        assert!(ClipExtension::new("mp3").is_ok());
        assert!(ClipExtension::new("").is_err());
        assert!(ClipExtension::new(".mp3").is_err());
        assert!(ClipExtension::new("a/b").is_err());
        assert_eq!(ClipExtension::default().as_str(), "mp3");
    }

    #[test]
    fn test_clip_request_counts_every_character() {
        let request = ClipRequest::new("AA b");
        assert_eq!(request.len(), 4);
        assert_eq!(request.characters().collect::<Vec<_>>(), vec!['A', 'A', ' ', 'b']);
    }

    #[test]
    fn test_clip_request_multibyte() {
        let request = ClipRequest::new("ᓗᔕ");
        assert_eq!(request.len(), 2);
        assert!(!request.is_empty());
    }
}
