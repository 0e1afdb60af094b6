//! Playback Adapter - 外部播放器进程

mod process_player;

pub use process_player::ProcessPlayer;
