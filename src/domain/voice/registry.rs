//! Voice Context - 音色注册表
//!
//! 音色名 → 音色目录 的映射。注册表是一个普通的值，由启动代码加载后
//! 显式传给需要解析音色的组件，不存在全局状态。

use super::{VoiceDirectory, VoiceError, VoiceName};

/// 内置默认音色（注册表文件缺失或无效时使用）
const BUILTIN_VOICES: &[(&str, &str)] = &[
    ("Michael", "VOICE/Michael"),
    ("Ava", "VOICE/Ava"),
    ("Michael(pause-less)", "VOICE/MICHAEL_DELAYLESS"),
];

/// 音色注册表
///
/// 不变量:
/// - 至少包含一个音色
/// - 音色名唯一，保持加载时的顺序
/// - 默认音色必定是注册表中的一项（未指定时为第一个）
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    entries: Vec<(VoiceName, VoiceDirectory)>,
    default_index: usize,
}

impl VoiceRegistry {
    /// 从有序条目创建注册表；重复的音色名以后出现的为准，位置保持首次出现处
    pub fn new(
        entries: impl IntoIterator<Item = (VoiceName, VoiceDirectory)>,
    ) -> Result<Self, VoiceError> {
        let mut merged: Vec<(VoiceName, VoiceDirectory)> = Vec::new();
        for (name, dir) in entries {
            match merged.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = dir,
                None => merged.push((name, dir)),
            }
        }

        if merged.is_empty() {
            return Err(VoiceError::EmptyRegistry);
        }

        Ok(Self {
            entries: merged,
            default_index: 0,
        })
    }

    /// 内置默认注册表
    pub fn builtin() -> Self {
        let entries = BUILTIN_VOICES
            .iter()
            .filter_map(|(name, dir)| {
                VoiceName::new(*name)
                    .ok()
                    .map(|name| (name, VoiceDirectory::new(*dir)))
            })
            .collect();
        Self {
            entries,
            default_index: 0,
        }
    }

    /// 指定默认音色，名称必须已注册
    pub fn with_default(mut self, name: &str) -> Result<Self, VoiceError> {
        self.default_index = self
            .entries
            .iter()
            .position(|(voice, _)| voice.as_str() == name)
            .ok_or_else(|| VoiceError::NotFound(name.to_string()))?;
        Ok(self)
    }

    /// 按名称解析音色目录
    pub fn resolve(&self, name: &str) -> Result<&VoiceDirectory, VoiceError> {
        self.entries
            .iter()
            .find(|(voice, _)| voice.as_str() == name)
            .map(|(_, dir)| dir)
            .ok_or_else(|| VoiceError::NotFound(name.to_string()))
    }

    /// 默认音色
    pub fn default_voice(&self) -> &VoiceName {
        &self.entries[self.default_index].0
    }

    pub fn is_default(&self, name: &VoiceName) -> bool {
        self.default_voice() == name
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(voice, _)| voice.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VoiceName, &VoiceDirectory)> {
        self.entries.iter().map(|(name, dir)| (name, dir))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn entry(name: &str, dir: &str) -> (VoiceName, VoiceDirectory) {
        (VoiceName::new(name).unwrap(), VoiceDirectory::new(dir))
    }

    #[test]
    fn test_builtin_registry() {
        let registry = VoiceRegistry::builtin();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.default_voice().as_str(), "Michael");
        assert_eq!(
            registry.resolve("Michael(pause-less)").unwrap().path(),
            Path::new("VOICE/MICHAEL_DELAYLESS")
        );
    }

    #[test]
    fn test_resolve_unknown_voice() {
        let registry = VoiceRegistry::builtin();
        assert!(matches!(
            registry.resolve("Nobody"),
            Err(VoiceError::NotFound(name)) if name == "Nobody"
        ));
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(matches!(
            VoiceRegistry::new(Vec::new()),
            Err(VoiceError::EmptyRegistry)
        ));
    }

    #[test]
    fn test_duplicate_names_keep_first_position() {
        let registry = VoiceRegistry::new(vec![
            entry("Ava", "a1"),
            entry("Bob", "b"),
            entry("Ava", "a2"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.default_voice().as_str(), "Ava");
        assert_eq!(registry.resolve("Ava").unwrap().path(), Path::new("a2"));
    }

    #[test]
    fn test_with_default() {
        let registry = VoiceRegistry::builtin().with_default("Ava").unwrap();
        assert_eq!(registry.default_voice().as_str(), "Ava");
        assert!(registry.is_default(&VoiceName::new("Ava").unwrap()));
        assert_eq!(registry.iter().next().unwrap().0.as_str(), "Michael");

        assert!(matches!(
            VoiceRegistry::builtin().with_default("Nobody"),
            Err(VoiceError::NotFound(_))
        ));
    }
}
