// 常に失敗するワークユニット（失敗報告の確認用）

use crate::core::{Emit, WorkUnit};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct FailingWorkUnit {
    steps_before_failure: u64,
    reason: String,
}

impl FailingWorkUnit {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            steps_before_failure: 0,
            reason: reason.into(),
        }
    }

    /// 失敗前に発行する進捗数を設定
    pub fn after_steps(mut self, steps: u64) -> Self {
        self.steps_before_failure = steps;
        self
    }
}

#[async_trait]
impl WorkUnit for FailingWorkUnit {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        for step in 1..=self.steps_before_failure {
            emitter.emit(format!("step {step}")).await?;
        }
        Err(anyhow::anyhow!(self.reason.clone()))
    }
}
