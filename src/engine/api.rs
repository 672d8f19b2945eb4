// 高レベル公開API
// Coordinatorを簡単に使用できるようにするための便利な関数

use super::coordinator::{Coordinator, WorkItem};
use crate::{
    core::{CoordinationResult, EpisodeSummary, Sink, WorkUnit},
    services::DefaultEpisodeConfig,
};
use std::sync::Arc;

/// デフォルト設定のCoordinatorを作成
pub fn create_default_coordinator() -> Coordinator<DefaultEpisodeConfig> {
    Coordinator::new(DefaultEpisodeConfig::default())
}

/// 進捗ログを出さないCoordinatorを作成（テスト・ベンチマーク用）
pub fn create_quiet_coordinator() -> Coordinator<DefaultEpisodeConfig> {
    Coordinator::new(DefaultEpisodeConfig::default().with_progress_reporting(false))
}

/// (ラベル, ワークユニット) の列で1エピソードを実行
///
/// デフォルト設定を使用する。細かい制御が必要な場合は`Coordinator`を直接使う。
pub async fn run_episode<L, W, S>(
    work_units: impl IntoIterator<Item = (L, W)>,
    sink: Arc<S>,
) -> CoordinationResult<EpisodeSummary>
where
    L: Into<String>,
    W: WorkUnit + 'static,
    S: Sink + ?Sized + 'static,
{
    let items = work_units
        .into_iter()
        .map(|(label, unit)| WorkItem::new(label, unit))
        .collect();

    create_default_coordinator().run_episode(items, sink).await
}
