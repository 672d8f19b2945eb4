// 設定管理の具象実装

use crate::core::{CoordinationError, CoordinationResult, EpisodeConfig};
use std::time::Duration;

/// デフォルトのチャンネル容量
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultEpisodeConfig {
    channel_capacity: usize,
    barrier_timeout: Option<Duration>,
    enable_progress: bool,
}

impl DefaultEpisodeConfig {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            channel_capacity,
            barrier_timeout: None,
            enable_progress: true,
        }
    }

    pub fn with_channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    pub fn with_barrier_timeout(mut self, barrier_timeout: Option<Duration>) -> Self {
        self.barrier_timeout = barrier_timeout;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 設定値の検証
    pub fn validate(&self) -> CoordinationResult<()> {
        if self.channel_capacity == 0 {
            return Err(CoordinationError::configuration(
                "チャンネル容量は1以上である必要があります",
            ));
        }
        if self.barrier_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(CoordinationError::configuration(
                "バリア待機の期限は0より大きい必要があります",
            ));
        }
        Ok(())
    }
}

impl Default for DefaultEpisodeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl EpisodeConfig for DefaultEpisodeConfig {
    fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    fn barrier_timeout(&self) -> Option<Duration> {
        self.barrier_timeout
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}
