// 数値系列の進捗レポーター

use crate::core::{Emit, WorkUnit};
use async_trait::async_trait;
use std::time::Duration;

/// `"<name>: i"` を 1..=count の順に発行するワークユニット
#[derive(Debug, Clone)]
pub struct NumberSeries {
    name: String,
    count: u64,
    interval: Duration,
}

impl NumberSeries {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
            interval: Duration::ZERO,
        }
    }

    /// 発行間隔を設定
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

#[async_trait]
impl WorkUnit for NumberSeries {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        for i in 1..=self.count {
            if i > 1 && !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }
            let payload = format!("{}: {i}", self.name);
            tracing::trace!(%payload, "emitting");
            emitter.emit(payload).await?;
        }
        Ok(())
    }
}
