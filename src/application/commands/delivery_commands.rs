//! Delivery Commands

use crate::domain::VoiceDirectory;

/// 播放文本命令（临时交付）
#[derive(Debug, Clone)]
pub struct PlayText {
    pub text: String,
    pub voice_dir: VoiceDirectory,
}

/// 导出文本命令（永久交付，文件以文本命名）
#[derive(Debug, Clone)]
pub struct ExportText {
    pub text: String,
    pub voice_dir: VoiceDirectory,
}
