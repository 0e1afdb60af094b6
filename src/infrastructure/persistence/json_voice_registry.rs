//! JSON Voice Registry - 从 JSON 文件加载音色注册表
//!
//! 文件格式：`{"音色名": "音色目录", ...}`，条目顺序即下拉顺序。

use std::path::Path;

use crate::domain::{VoiceDirectory, VoiceError, VoiceName, VoiceRegistry};

/// 解析注册表 JSON
///
/// 文档本身必须是对象；其中目录不是字符串或名称无效的条目被跳过。
pub fn parse_voice_registry(json: &str) -> Result<VoiceRegistry, VoiceError> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(json).map_err(|e| VoiceError::RegistryFormat(e.to_string()))?;

    let mut entries = Vec::with_capacity(map.len());
    for (name, value) in map {
        let Some(dir) = value.as_str() else {
            tracing::warn!(voice = %name, "Skipping voice entry: directory must be a string");
            continue;
        };
        match VoiceName::new(name.as_str()) {
            Ok(voice) => entries.push((voice, VoiceDirectory::new(dir))),
            Err(reason) => {
                tracing::warn!(voice = %name, reason, "Skipping voice entry: invalid name");
            }
        }
    }

    VoiceRegistry::new(entries)
}

/// 读取并解析注册表文件
pub async fn load_voice_registry(path: &Path) -> Result<VoiceRegistry, VoiceError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| VoiceError::RegistryIo(format!("{}: {}", path.display(), e)))?;
    parse_voice_registry(&json)
}

/// 读取注册表文件，失败时退回内置默认音色
pub async fn load_voice_registry_or_builtin(path: &Path) -> VoiceRegistry {
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Voice registry not found, using built-in voices"
        );
        return VoiceRegistry::builtin();
    }

    match load_voice_registry(path).await {
        Ok(registry) => {
            tracing::info!(
                path = %path.display(),
                voices = registry.len(),
                "Voice registry loaded"
            );
            registry
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to load voice registry, using built-in voices"
            );
            VoiceRegistry::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_keeps_file_order() {
        let registry =
            parse_voice_registry(r#"{"Zed": "VOICE/Zed", "Ava": "VOICE/Ava"}"#).unwrap();

        let names: Vec<_> = registry.iter().map(|(n, _)| n.as_str().to_string()).collect();
        assert_eq!(names, vec!["Zed", "Ava"]);
        assert_eq!(registry.default_voice().as_str(), "Zed");
        assert_eq!(registry.resolve("Ava").unwrap().path(), Path::new("VOICE/Ava"));
    }

    #[test]
    fn test_parse_rejects_bad_documents() {
        assert!(matches!(
            parse_voice_registry("not json"),
            Err(VoiceError::RegistryFormat(_))
        ));
        assert!(matches!(
            parse_voice_registry(r#"["VOICE/Ava"]"#),
            Err(VoiceError::RegistryFormat(_))
        ));
        assert!(matches!(
            parse_voice_registry("{}"),
            Err(VoiceError::EmptyRegistry)
        ));
        // 没有一条有效条目
        assert!(matches!(
            parse_voice_registry(r#"{"Ava": 3, "": "VOICE/x"}"#),
            Err(VoiceError::EmptyRegistry)
        ));
    }

    #[test]
    fn test_parse_skips_bad_entries() {
        let long_name = "x".repeat(101);
        let json = format!(
            r#"{{"Ava": 3, "  ": "VOICE/blank", "Zed": "VOICE/Zed", "{}": "VOICE/long", "Bob": null, "Kim": "VOICE/Kim"}}"#,
            long_name
        );
        let registry = parse_voice_registry(&json).unwrap();

        let names: Vec<_> = registry.iter().map(|(n, _)| n.as_str().to_string()).collect();
        assert_eq!(names, vec!["Zed", "Kim"]);
        assert_eq!(registry.default_voice().as_str(), "Zed");
        assert!(!registry.contains("Ava"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voices.json");
        std::fs::write(&path, r#"{"Ava": "VOICE/Ava"}"#).unwrap();

        let registry = load_voice_registry(&path).await.unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_to_builtin() {
        let dir = tempdir().unwrap();

        let missing = load_voice_registry_or_builtin(&dir.path().join("missing.json")).await;
        assert_eq!(missing.default_voice().as_str(), "Michael");

        let broken_path = dir.path().join("broken.json");
        std::fs::write(&broken_path, "{").unwrap();
        let broken = load_voice_registry_or_builtin(&broken_path).await;
        assert_eq!(broken.len(), 3);

        let empty_path = dir.path().join("empty.json");
        std::fs::write(&empty_path, "{}").unwrap();
        let empty = load_voice_registry_or_builtin(&empty_path).await;
        assert!(empty.contains("Ava"));

        let partial_path = dir.path().join("partial.json");
        std::fs::write(&partial_path, r#"{"Ava": 1, "Zed": "VOICE/Zed"}"#).unwrap();
        let partial = load_voice_registry_or_builtin(&partial_path).await;
        assert_eq!(partial.len(), 1);
        assert!(partial.contains("Zed"));
    }
}
