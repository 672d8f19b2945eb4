// 設定サービス

pub mod implementations;

pub use implementations::{DefaultEpisodeConfig, DEFAULT_CHANNEL_CAPACITY};
