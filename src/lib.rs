pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

use crate::core::{CoordinationResult, EpisodeConfig, EpisodeSummary, Sink};
use engine::{Coordinator, WorkItem};
use std::sync::Arc;

// DIコンテナの役割を果たすジェネリックなApp構造体
// 設定とSinkを所有し、エピソードごとに新しいチャンネルとバリアを使う
pub struct App<C, S>
where
    C: EpisodeConfig,
    S: Sink + ?Sized + 'static,
{
    coordinator: Coordinator<C>,
    sink: Arc<S>,
}

impl<C, S> App<C, S>
where
    C: EpisodeConfig,
    S: Sink + ?Sized + 'static,
{
    /// 新しいAppインスタンスを作成（コンストラクタインジェクション）
    pub fn new(config: C, sink: Arc<S>) -> Self {
        Self {
            coordinator: Coordinator::new(config),
            sink,
        }
    }

    pub fn config(&self) -> &C {
        self.coordinator.config()
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// 1エピソードを実行
    pub async fn run(&self, work_units: Vec<WorkItem>) -> CoordinationResult<EpisodeSummary> {
        self.coordinator
            .run_episode(work_units, Arc::clone(&self.sink))
            .await
    }
}
